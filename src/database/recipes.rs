// ABOUTME: Recipe search history database operations
// ABOUTME: Persists the results of each successful recipe website search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use super::{encode_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Recipe;
use chrono::{DateTime, Utc};
use sqlx::Row;

impl Database {
    /// Create the recipes table
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                keyword TEXT NOT NULL,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                additional_type TEXT NOT NULL DEFAULT '',
                image TEXT NOT NULL DEFAULT '',
                fetched_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema("CREATE INDEX IF NOT EXISTS idx_recipes_keyword ON recipes(keyword)")
            .await
    }

    /// Store search results for a keyword
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is stored in that case
    pub async fn save_recipes(
        &self,
        keyword: &str,
        recipes: &[Recipe],
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let fetched_at = encode_timestamp(now);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        for recipe in recipes {
            sqlx::query(
                r"
                INSERT INTO recipes (keyword, name, url, description, additional_type, image, fetched_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(keyword)
            .bind(&recipe.name)
            .bind(&recipe.url)
            .bind(&recipe.description)
            .bind(&recipe.additional_type)
            .bind(&recipe.image)
            .bind(&fetched_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save recipe: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipes: {e}")))
    }

    /// Most recently stored recipes for a keyword
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_recipes(&self, keyword: &str, limit: usize) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT name, url, description, additional_type, image
            FROM recipes
            WHERE keyword = $1
            ORDER BY fetched_at DESC, id ASC
            LIMIT $2
            ",
        )
        .bind(keyword)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch recipes: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| Recipe {
                name: row.get("name"),
                url: row.get("url"),
                description: row.get("description"),
                additional_type: row.get("additional_type"),
                image: row.get("image"),
            })
            .collect())
    }
}
