// ABOUTME: Error handling re-exports from fridge-core
// ABOUTME: AppError, ErrorCode, and the inventory domain errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Unified Error Handling System
//!
//! The error types live in `fridge-core` so every crate in the workspace shares
//! one `AppError`. This module re-exports them under `crate::errors`.

pub use fridge_core::errors::*;
