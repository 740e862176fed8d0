// ABOUTME: icook.tw search client with an in-memory TTL cache and result persistence
// ABOUTME: Fetches /search/{keyword}/ and extracts the listed recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{parser::extract_recipes, RecipeSource};
use crate::config::RecipeSearchConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Recipe;

const SERVICE: &str = "icook";

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Recipe website client
pub struct IcookClient {
    config: RecipeSearchConfig,
    http_client: reqwest::Client,
    cache: Arc<RwLock<HashMap<String, CacheEntry<Vec<Recipe>>>>>,
    database: Option<Database>,
}

impl IcookClient {
    /// Create a client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: RecipeSearchConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
            cache: Arc::new(RwLock::new(HashMap::new())),
            database: None,
        })
    }

    /// Persist every successful search into the `recipes` table
    #[must_use]
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    fn search_url(&self, keywords: &str) -> String {
        format!(
            "{}/search/{}/",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(keywords)
        )
    }

    async fn cached(&self, key: &str) -> Option<Vec<Recipe>> {
        let cache = self.cache.read().await;
        cache
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.data.clone())
    }

    async fn fetch(&self, keywords: &str) -> AppResult<Vec<Recipe>> {
        let url = self.search_url(keywords);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("HTTP {} for {url}", response.status()),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("Failed to read page: {e}")))?;

        Ok(extract_recipes(&html, self.config.result_limit))
    }

    /// Number of live and expired cache entries
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl RecipeSource for IcookClient {
    #[instrument(skip(self))]
    async fn search(&self, keywords: &str) -> AppResult<Vec<Recipe>> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(AppError::invalid_input("Search keywords cannot be empty"));
        }

        if let Some(recipes) = self.cached(keywords).await {
            debug!(count = recipes.len(), "Recipe cache hit");
            return Ok(recipes);
        }

        let recipes = self.fetch(keywords).await?;
        info!(count = recipes.len(), "Recipe search complete");

        if let Some(database) = &self.database {
            if !recipes.is_empty() {
                if let Err(e) = database.save_recipes(keywords, &recipes, Utc::now()).await {
                    warn!(error = %e, "Failed to persist recipe search results");
                }
            }
        }

        {
            let mut cache = self.cache.write().await;
            cache.insert(
                keywords.to_owned(),
                CacheEntry {
                    data: recipes.clone(),
                    expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
                },
            );
        }

        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_keywords() {
        let client = IcookClient::new(
            RecipeSearchConfig {
                base_url: "https://icook.tw/".to_owned(),
                ..RecipeSearchConfig::default()
            },
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.search_url("番茄 雞蛋"),
            "https://icook.tw/search/%E7%95%AA%E8%8C%84%20%E9%9B%9E%E8%9B%8B/"
        );
    }

    #[tokio::test]
    async fn test_empty_keywords_rejected() {
        let client =
            IcookClient::new(RecipeSearchConfig::default(), Duration::from_secs(5)).unwrap();
        assert!(client.search("   ").await.is_err());
        assert_eq!(client.cache_len().await, 0);
    }
}
