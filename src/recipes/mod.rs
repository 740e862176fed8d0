// ABOUTME: Recipe search over an external recipe website
// ABOUTME: Defines the RecipeSource contract used by the chat handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Recipe Search
//!
//! [`IcookClient`] fetches the search results page for a keyword and reads the
//! recipe list out of its JSON-LD metadata.

mod icook;
mod parser;

pub use icook::IcookClient;
pub use parser::extract_recipes;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::Recipe;

/// Anything that can turn search keywords into recipes
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Search for recipes matching `keywords`; an empty result is not an error
    async fn search(&self, keywords: &str) -> AppResult<Vec<Recipe>>;
}
