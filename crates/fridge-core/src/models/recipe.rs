// ABOUTME: Recipe search result model
// ABOUTME: Fields mirror the ListItem entries of the recipe site's structured data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use serde::{Deserialize, Serialize};

/// A recipe returned by a keyword search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title
    pub name: String,
    /// Link to the recipe page
    pub url: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Recipe category reported by the site
    #[serde(default, rename = "additionalType")]
    pub additional_type: String,
    /// Cover image URL
    #[serde(default)]
    pub image: String,
}
