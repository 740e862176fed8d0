// ABOUTME: Extracts recipe listings from the JSON-LD blocks of a search results page
// ABOUTME: Walks @graph for ItemList elements of type ListItem
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::models::Recipe;

/// Matches `<script type="application/ld+json">...</script>` and captures the body
static LD_JSON_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<script[^>]*\btype\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .ok()
});

/// Recipes listed on a search results page, in page order, at most `limit`
///
/// Blocks that are not valid JSON are skipped.
#[must_use]
pub fn extract_recipes(html: &str, limit: usize) -> Vec<Recipe> {
    let Some(pattern) = LD_JSON_PATTERN.as_ref() else {
        return Vec::new();
    };

    let mut recipes = Vec::new();
    for captures in pattern.captures_iter(html) {
        let Some(body) = captures.get(1) else {
            continue;
        };
        match serde_json::from_str::<Value>(body.as_str().trim()) {
            Ok(document) => collect_list_items(&document, &mut recipes),
            Err(e) => debug!(error = %e, "Skipping unparsable JSON-LD block"),
        }
        if recipes.len() >= limit {
            break;
        }
    }

    recipes.truncate(limit);
    recipes
}

fn collect_list_items(document: &Value, recipes: &mut Vec<Recipe>) {
    let Some(graph) = document.get("@graph").and_then(Value::as_array) else {
        return;
    };

    let elements = graph
        .iter()
        .filter(|item| has_type(item, "ItemList"))
        .filter_map(|item| item.get("itemListElement").and_then(Value::as_array))
        .flatten()
        .filter(|element| has_type(element, "ListItem"));

    recipes.extend(elements.map(|element| Recipe {
        name: string_field(element, "name"),
        url: string_field(element, "url"),
        description: string_field(element, "description"),
        additional_type: string_field(element, "additionalType"),
        image: string_field(element, "image"),
    }));
}

fn has_type(value: &Value, expected: &str) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == expected,
        Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some(expected)),
        _ => false,
    }
}

/// A string property, or the `url` of an object-valued one, or the first of a list
fn string_field(value: &Value, key: &str) -> String {
    fn as_text(value: &Value) -> Option<&str> {
        match value {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("url").and_then(Value::as_str),
            Value::Array(items) => items.first().and_then(as_text),
            _ => None,
        }
    }

    value
        .get(key)
        .and_then(as_text)
        .unwrap_or_default()
        .to_owned()
}
