// ABOUTME: Shelf-life table mapping food names to default shelf life in days
// ABOUTME: Seeded once with a fixed list and extended lazily for unknown names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use crate::constants::inventory::DEFAULT_SHELF_LIFE_SEED;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::ShelfLifeEntry;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Food name to shelf-life lookup backed by the `shelf_life` table
///
/// Names are exact keys: no normalization, no synonyms. Entries are never
/// deleted.
#[derive(Clone)]
pub struct ShelfLifeTable {
    pool: SqlitePool,
    default_days: u32,
}

impl ShelfLifeTable {
    /// Create a table handle; `default_days` is used for unknown names
    #[must_use]
    pub fn new(db: &Database, default_days: u32) -> Self {
        Self {
            pool: db.pool().clone(),
            default_days,
        }
    }

    /// Shelf life given to names seen for the first time
    #[must_use]
    pub const fn default_days(&self) -> u32 {
        self.default_days
    }

    /// Insert the default list when the table is empty
    ///
    /// Returns the number of rows inserted, zero when the table already had
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let existing: i64 = sqlx::query("SELECT COUNT(*) AS count FROM shelf_life")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to count shelf-life entries: {e}")))?
            .get("count");

        if existing > 0 {
            debug!(existing, "Shelf-life table already seeded");
            return Ok(0);
        }

        for (name, days) in DEFAULT_SHELF_LIFE_SEED {
            sqlx::query("INSERT OR IGNORE INTO shelf_life (food_name, shelf_life_days) VALUES ($1, $2)")
                .bind(*name)
                .bind(i64::from(*days))
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to seed shelf life: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit shelf-life seed: {e}")))?;

        info!(count = DEFAULT_SHELF_LIFE_SEED.len(), "Seeded shelf-life table");
        Ok(DEFAULT_SHELF_LIFE_SEED.len())
    }

    /// Exact-match lookup
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn lookup(&self, food_name: &str) -> AppResult<Option<u32>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        lookup_in(&mut conn, food_name).await
    }

    /// Return the stored shelf life, inserting the default first if absent
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn ensure(&self, food_name: &str) -> AppResult<u32> {
        self.ensure_with_default(food_name, self.default_days).await
    }

    /// Like [`Self::ensure`] with an explicit default
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a zero default, or a database error
    pub async fn ensure_with_default(&self, food_name: &str, default_days: u32) -> AppResult<u32> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        ensure_in(&mut conn, food_name, default_days).await
    }

    /// All entries ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<ShelfLifeEntry>> {
        let rows = sqlx::query("SELECT food_name, shelf_life_days FROM shelf_life ORDER BY food_name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list shelf life: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(ShelfLifeEntry {
                    food_name: row.get("food_name"),
                    shelf_life_days: decode_days(row.get("shelf_life_days"))?,
                })
            })
            .collect()
    }
}

/// Lookup on an existing connection or transaction
pub(super) async fn lookup_in(conn: &mut SqliteConnection, food_name: &str) -> AppResult<Option<u32>> {
    let row = sqlx::query("SELECT shelf_life_days FROM shelf_life WHERE food_name = $1")
        .bind(food_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up shelf life: {e}")))?;

    row.map(|row| decode_days(row.get("shelf_life_days")))
        .transpose()
}

/// Ensure on an existing connection or transaction
pub(super) async fn ensure_in(
    conn: &mut SqliteConnection,
    food_name: &str,
    default_days: u32,
) -> AppResult<u32> {
    if default_days == 0 {
        return Err(AppError::invalid_input("Default shelf life must be positive"));
    }

    let inserted = sqlx::query("INSERT OR IGNORE INTO shelf_life (food_name, shelf_life_days) VALUES ($1, $2)")
        .bind(food_name)
        .bind(i64::from(default_days))
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert shelf life: {e}")))?
        .rows_affected();

    if inserted > 0 {
        info!(food = %food_name, days = default_days, "Added unknown food to shelf-life table");
    }

    lookup_in(conn, food_name)
        .await?
        .ok_or_else(|| AppError::internal(format!("Shelf life for {food_name} missing after insert")))
}

fn decode_days(raw: i64) -> AppResult<u32> {
    u32::try_from(raw)
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| AppError::database(format!("Invalid stored shelf life {raw}")))
}
