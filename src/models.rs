// ABOUTME: Core data models re-exported from fridge-core
// ABOUTME: Users, food entries, shelf-life entries, telemetry, and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Data Models
//!
//! The model types live in `fridge-core`; this module re-exports them under
//! `crate::models`.

pub use fridge_core::models::*;
