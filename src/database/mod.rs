// ABOUTME: SQLite database handle, schema migrations, and timestamp encoding
// ABOUTME: Split across files by table group: users, inventory, telemetry, recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Database Management
//!
//! One [`Database`] handle wraps the `SQLite` pool and is passed explicitly to
//! every component that needs storage. Migrations are idempotent
//! `CREATE TABLE IF NOT EXISTS` statements run on startup.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text
//! (`2025-03-01T12:00:00.000000Z`) so that string comparison in SQL matches
//! chronological order.

mod inventory;
mod recipes;
mod sensors;
mod users;

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Database handle shared by all components
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to an in-memory database would see its own empty
        // schema, so keep exactly one.
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a table or index cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_inventory().await?;
        self.migrate_sensors().await?;
        self.migrate_recipes().await?;

        info!("Database migrations complete");
        Ok(())
    }

    /// Cheap round trip used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    async fn execute_schema(&self, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        Ok(())
    }
}

/// Digits of sub-second precision kept in storage
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Drop the precision that storage does not keep
///
/// Values computed from the result survive a write/read round trip unchanged.
#[must_use]
pub fn storage_timestamp(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Encode a timestamp in the fixed-width storage format
#[must_use]
pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp
///
/// # Errors
///
/// Returns a database error if the text is not RFC 3339
pub fn decode_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}': {e}")))
}

/// Convert a stored quantity back to its unsigned form
pub(crate) fn decode_quantity(raw: i64) -> AppResult<u32> {
    u32::try_from(raw).map_err(|_| AppError::database(format!("Invalid stored quantity {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_encoding_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::microseconds(1500);

        let a = encode_timestamp(whole);
        let b = encode_timestamp(fractional);
        assert_eq!(a, "2025-03-01T12:00:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(decode_timestamp(&b).unwrap(), fractional);
    }

    #[test]
    fn test_storage_timestamp_matches_encoding() {
        let precise = Utc.with_ymd_and_hms(2025, 3, 8, 4, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);

        let stored = storage_timestamp(precise);
        assert_eq!(stored.timestamp_subsec_nanos(), 123_456_000);
        assert_eq!(decode_timestamp(&encode_timestamp(precise)).unwrap(), stored);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_timestamp("yesterday").is_err());
        assert!(decode_quantity(-1).is_err());
        assert_eq!(decode_quantity(3).unwrap(), 3);
    }

    #[tokio::test]
    async fn test_memory_database_migrates() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.ping().await.unwrap();
        // Migrations are idempotent
        db.migrate().await.unwrap();
    }
}
