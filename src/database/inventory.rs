// ABOUTME: Schema for the shelf-life table and per-user food entries
// ABOUTME: Queries against these tables live in the inventory module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use super::Database;
use crate::errors::AppResult;

impl Database {
    /// Create the shelf-life and food entry tables
    pub(super) async fn migrate_inventory(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS shelf_life (
                food_name TEXT PRIMARY KEY,
                shelf_life_days INTEGER NOT NULL CHECK (shelf_life_days > 0)
            )
            ",
        )
        .await?;

        // One row per (user, food name); repeated adds increment quantity
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS food_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity > 0),
                added_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                UNIQUE (user_id, name)
            )
            ",
        )
        .await?;

        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_food_entries_user_expiry \
             ON food_entries(user_id, expires_at)",
        )
        .await
    }
}
