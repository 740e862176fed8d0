// ABOUTME: Food inventory models: shelf-life entries, food entries, and mutation outcomes
// ABOUTME: AddOutcome and RemoveOutcome render the status text sent back to the user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default shelf life for one food name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLifeEntry {
    /// Food name (unique, exact match)
    pub food_name: String,
    /// Shelf life in whole days, always positive
    pub shelf_life_days: u32,
}

/// One food name held by one user
///
/// At most one entry exists per `(user_id, name)`. The expiry is fixed when
/// the entry is created and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Row id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Food name
    pub name: String,
    /// Positive quantity
    pub quantity: u32,
    /// When the entry was first created
    pub added_at: DateTime<Utc>,
    /// When the food expires
    pub expires_at: DateTime<Utc>,
}

/// A parsed `(name, quantity)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodQuantity {
    /// Food name, a single token
    pub name: String,
    /// Positive quantity
    pub quantity: u32,
}

impl FoodQuantity {
    /// Create a pair
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Result of adding food to an inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was created
    Added {
        /// Food name
        name: String,
        /// Stored quantity
        quantity: u32,
        /// Expiry of the new entry
        expires_at: DateTime<Utc>,
    },
    /// An existing entry was incremented; its expiry is unchanged
    Updated {
        /// Food name
        name: String,
        /// Quantity after the increment
        quantity: u32,
        /// Expiry of the existing entry
        expires_at: DateTime<Utc>,
    },
}

impl AddOutcome {
    /// Stored quantity after the add
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        match self {
            Self::Added { quantity, .. } | Self::Updated { quantity, .. } => *quantity,
        }
    }

    /// Expiry of the stored entry
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        match self {
            Self::Added { expires_at, .. } | Self::Updated { expires_at, .. } => *expires_at,
        }
    }
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { name, quantity, .. } => {
                write!(f, "食品添加成功: {name} x{quantity}")
            }
            Self::Updated { name, quantity, .. } => {
                write!(f, "已更新 {name} 的數量。現有數量: {quantity}")
            }
        }
    }
}

/// How much of an entry to remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveAmount {
    /// Remove this many units
    Quantity(u32),
    /// Remove the whole entry
    All,
}

/// Result of removing food from an inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Quantity was reduced and the entry remains
    Decremented {
        /// Food name
        name: String,
        /// Quantity left
        remaining: u32,
    },
    /// The entry was deleted
    Deleted {
        /// Food name
        name: String,
    },
}

impl fmt::Display for RemoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decremented { name, remaining } => {
                write!(f, "已移除部分 {name}。剩餘數量: {remaining}")
            }
            Self::Deleted { name } => write!(f, "已從冰箱移除 {name}。"),
        }
    }
}
