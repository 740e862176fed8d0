// ABOUTME: User management database operations
// ABOUTME: Creates users on first contact and links them to telemetry devices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use super::{decode_timestamp, encode_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                line_id TEXT UNIQUE NOT NULL,
                display_name TEXT NOT NULL,
                device_id TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema("CREATE INDEX IF NOT EXISTS idx_users_device_id ON users(device_id)")
            .await
    }

    /// Look up a user by platform id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_line_id(&self, line_id: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, line_id, display_name, device_id, created_at FROM users WHERE line_id = $1",
        )
        .bind(line_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch user: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Create a user, or return the existing one with the same platform id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the follow-up read fails
    pub async fn create_user(
        &self,
        line_id: &str,
        display_name: &str,
        now: DateTime<Utc>,
    ) -> AppResult<User> {
        sqlx::query(
            r"
            INSERT INTO users (line_id, display_name, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(line_id) DO NOTHING
            ",
        )
        .bind(line_id)
        .bind(display_name)
        .bind(encode_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        self.get_user_by_line_id(line_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("User {line_id} missing after insert")))
    }

    /// All users, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, line_id, display_name, device_id, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        rows.iter().map(row_to_user).collect()
    }

    /// Link a user to a telemetry device, registering the device if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails
    pub async fn bind_device(
        &self,
        user_id: i64,
        device_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            "INSERT INTO devices (device_id, description, created_at) VALUES ($1, '', $2) \
             ON CONFLICT(device_id) DO NOTHING",
        )
        .bind(device_id)
        .bind(encode_timestamp(now))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to register device: {e}")))?;

        let result = sqlx::query("UPDATE users SET device_id = $1 WHERE id = $2")
            .bind(device_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to bind device: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id}")));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit device binding: {e}")))
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let created_at: String = row.get("created_at");
    Ok(User {
        id: row.get("id"),
        line_id: row.get("line_id"),
        display_name: row.get("display_name"),
        device_id: row.get("device_id"),
        created_at: decode_timestamp(&created_at)?,
    })
}
