// ABOUTME: Core types and constants for the fridge companion chatbot
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # Fridge Core
//!
//! Foundation crate providing shared types for the fridge companion bot.
//! It changes rarely, so the server crate gets incremental compilation
//! benefits from keeping these definitions here.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the inventory domain errors
//! - **models**: users, food entries, shelf-life entries, and sensor readings
//! - **constants**: defaults, seed data, and user-facing reply texts

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models (users, food entries, shelf life, telemetry)
pub mod models;

/// Application constants organized by domain
pub mod constants;
