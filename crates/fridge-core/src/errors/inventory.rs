// ABOUTME: Inventory-specific error types raised by add and remove operations
// ABOUTME: Display strings are user-facing replies; conversions feed the AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Inventory Error Types
//!
//! Errors produced by the per-user food inventory. Every variant except
//! `Storage` is recovered by the chat layer and sent back to the user as its
//! `Display` text, so the messages are written in Traditional Chinese.

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by inventory mutations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No entry with this name exists for the user
    #[error("你的冰箱裡沒有 {name}。")]
    EntryNotFound {
        /// Food name that was requested
        name: String,
    },
    /// Removal asked for more than is stored; the entry is left unchanged
    #[error("{name} 的數量不足，現有數量: {available}，欲移除: {requested}")]
    InsufficientQuantity {
        /// Food name
        name: String,
        /// Quantity the user asked to remove
        requested: u32,
        /// Quantity currently stored
        available: u32,
    },
    /// Quantity must be a positive integer
    #[error("{name} 的數量必須大於 0，收到: {quantity}")]
    InvalidQuantity {
        /// Food name
        name: String,
        /// Rejected quantity
        quantity: u32,
    },
    /// Underlying storage failure
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl InventoryError {
    /// Create an "entry not found" error
    #[must_use]
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }

    /// Create an "insufficient quantity" error
    #[must_use]
    pub fn insufficient_quantity(name: impl Into<String>, requested: u32, available: u32) -> Self {
        Self::InsufficientQuantity {
            name: name.into(),
            requested,
            available,
        }
    }

    /// Create an "invalid quantity" error
    #[must_use]
    pub fn invalid_quantity(name: impl Into<String>, quantity: u32) -> Self {
        Self::InvalidQuantity {
            name: name.into(),
            quantity,
        }
    }

    /// Whether the error is a user mistake rather than a storage failure
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for InventoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::Storage(AppError::from(error))
    }
}

impl From<InventoryError> for AppError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::EntryNotFound { .. } => {
                Self::new(ErrorCode::ResourceNotFound, error.to_string())
            }
            InventoryError::InsufficientQuantity { .. } | InventoryError::InvalidQuantity { .. } => {
                Self::new(ErrorCode::InvalidInput, error.to_string())
            }
            InventoryError::Storage(inner) => inner,
        }
    }
}
