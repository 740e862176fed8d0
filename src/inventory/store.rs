// ABOUTME: Per-user food inventory with merge-by-name adds and partial or full removals
// ABOUTME: Every mutation runs in one SQLite transaction; expiry is fixed at creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use super::shelf_life::{ensure_in, ShelfLifeTable};
use crate::database::{
    decode_quantity, decode_timestamp, encode_timestamp, storage_timestamp, Database,
};
use crate::errors::{AppError, AppResult, InventoryError};
use crate::models::{AddOutcome, FoodEntry, RemoveAmount, RemoveOutcome};
use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{info, instrument};

const ENTRY_COLUMNS: &str = "id, user_id, name, quantity, added_at, expires_at";

/// Food entries for all users
///
/// Holds at most one entry per `(user, name)`. Adding a name that already
/// exists increments its quantity and keeps the original expiry.
#[derive(Clone)]
pub struct Inventory {
    pool: SqlitePool,
    shelf_life: ShelfLifeTable,
}

impl Inventory {
    /// Create an inventory over the given database
    #[must_use]
    pub fn new(db: &Database, shelf_life: ShelfLifeTable) -> Self {
        Self {
            pool: db.pool().clone(),
            shelf_life,
        }
    }

    /// The shelf-life table consulted on add
    #[must_use]
    pub const fn shelf_life(&self) -> &ShelfLifeTable {
        &self.shelf_life
    }

    /// Add `quantity` units of `name` for a user
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for zero or when the merged quantity would
    /// overflow, or `Storage` on database failure
    #[instrument(skip(self, now))]
    pub async fn add(
        &self,
        user_id: i64,
        name: &str,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<AddOutcome, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::invalid_quantity(name, quantity));
        }
        let now = storage_timestamp(now);

        let mut tx = self.pool.begin().await?;

        // Resolve shelf life first: the insert takes the write lock up front
        let shelf_life_days = ensure_in(&mut tx, name, self.shelf_life.default_days()).await?;

        let outcome = match fetch_entry(&mut tx, user_id, name).await? {
            Some(existing) => {
                let merged = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| InventoryError::invalid_quantity(name, quantity))?;

                sqlx::query("UPDATE food_entries SET quantity = $1 WHERE id = $2")
                    .bind(i64::from(merged))
                    .bind(existing.id)
                    .execute(&mut *tx)
                    .await?;

                AddOutcome::Updated {
                    name: existing.name,
                    quantity: merged,
                    expires_at: existing.expires_at,
                }
            }
            None => {
                let expires_at = now + Duration::days(i64::from(shelf_life_days));

                sqlx::query(
                    r"
                    INSERT INTO food_entries (user_id, name, quantity, added_at, expires_at)
                    VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(user_id)
                .bind(name)
                .bind(i64::from(quantity))
                .bind(encode_timestamp(now))
                .bind(encode_timestamp(expires_at))
                .execute(&mut *tx)
                .await?;

                AddOutcome::Added {
                    name: name.to_owned(),
                    quantity,
                    expires_at,
                }
            }
        };

        tx.commit().await?;

        info!(
            user_id,
            food = %name,
            added = quantity,
            total = outcome.quantity(),
            merged = matches!(outcome, AddOutcome::Updated { .. }),
            "Food added to inventory"
        );
        Ok(outcome)
    }

    /// Remove some or all units of `name` for a user
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the user has no such entry,
    /// `InsufficientQuantity` when asking for more than is stored (the entry
    /// is left unchanged), `InvalidQuantity` for zero, or `Storage`
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        user_id: i64,
        name: &str,
        amount: RemoveAmount,
    ) -> Result<RemoveOutcome, InventoryError> {
        if amount == RemoveAmount::Quantity(0) {
            return Err(InventoryError::invalid_quantity(name, 0));
        }

        let mut tx = self.pool.begin().await?;

        let existing = fetch_entry(&mut tx, user_id, name)
            .await?
            .ok_or_else(|| InventoryError::entry_not_found(name))?;

        let outcome = match amount {
            RemoveAmount::Quantity(requested) if requested < existing.quantity => {
                let remaining = existing.quantity - requested;
                sqlx::query("UPDATE food_entries SET quantity = $1 WHERE id = $2")
                    .bind(i64::from(remaining))
                    .bind(existing.id)
                    .execute(&mut *tx)
                    .await?;
                RemoveOutcome::Decremented {
                    name: existing.name,
                    remaining,
                }
            }
            RemoveAmount::Quantity(requested) if requested > existing.quantity => {
                return Err(InventoryError::insufficient_quantity(
                    name,
                    requested,
                    existing.quantity,
                ));
            }
            RemoveAmount::Quantity(_) | RemoveAmount::All => {
                sqlx::query("DELETE FROM food_entries WHERE id = $1")
                    .bind(existing.id)
                    .execute(&mut *tx)
                    .await?;
                RemoveOutcome::Deleted {
                    name: existing.name,
                }
            }
        };

        tx.commit().await?;

        info!(user_id, food = %name, outcome = %outcome, "Food removed from inventory");
        Ok(outcome)
    }

    /// One entry by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, user_id: i64, name: &str) -> AppResult<Option<FoodEntry>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        fetch_entry(&mut conn, user_id, name).await
    }

    /// Snapshot of a user's entries ordered by expiry, then name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<FoodEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM food_entries WHERE user_id = $1 \
             ORDER BY expires_at ASC, name ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list inventory: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Entries with `now <= expires_at <= now + horizon`, ordered by expiry
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn expiring_within(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        horizon: Duration,
    ) -> AppResult<Vec<FoodEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM food_entries \
             WHERE user_id = $1 AND expires_at >= $2 AND expires_at <= $3 \
             ORDER BY expires_at ASC, name ASC"
        ))
        .bind(user_id)
        .bind(encode_timestamp(now))
        .bind(encode_timestamp(now + horizon))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query expiring food: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }
}

async fn fetch_entry(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> AppResult<Option<FoodEntry>> {
    let row = sqlx::query(&format!(
        "SELECT {ENTRY_COLUMNS} FROM food_entries WHERE user_id = $1 AND name = $2"
    ))
    .bind(user_id)
    .bind(name)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to fetch food entry: {e}")))?;

    row.as_ref().map(row_to_entry).transpose()
}

fn row_to_entry(row: &SqliteRow) -> AppResult<FoodEntry> {
    let added_at: String = row.get("added_at");
    let expires_at: String = row.get("expires_at");
    Ok(FoodEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        quantity: decode_quantity(row.get("quantity"))?,
        added_at: decode_timestamp(&added_at)?,
        expires_at: decode_timestamp(&expires_at)?,
    })
}
