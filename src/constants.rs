// ABOUTME: Application constants re-exported from fridge-core
// ABOUTME: Defaults, seed data, and user-facing reply texts organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Constants Module
//!
//! Pure data constants shared across the workspace. See `fridge_core::constants`.

pub use fridge_core::constants::*;
