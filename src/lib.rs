// ABOUTME: Main library entry point for the smart-fridge companion chatbot
// ABOUTME: Food inventory with expiry reminders, recipe search, and fridge telemetry over LINE
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

#![deny(unsafe_code)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

//! # Fridge Companion
//!
//! A LINE Messaging API webhook receiver that keeps a virtual fridge per
//! user: food is added and removed by chat command or photo, every entry
//! gets an expiry date from a shelf-life table, and a background job pushes
//! reminders for food about to expire.
//!
//! ## Architecture
//!
//! - **Inventory**: shelf-life table, per-user food entries, command argument
//!   parser, and the reminder job
//! - **Bot**: chat command recognition and event handling
//! - **LINE / LLM / Recipes**: clients for the chat platform, the generative
//!   model, and the recipe website, each behind a trait
//! - **Routes**: webhook, sensor telemetry, and health endpoints
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fridge_companion::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Fridge companion configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Chat command recognition, replies, and event handling
pub mod bot;

/// Configuration loaded from the environment
pub mod config;

/// Application constants and reply texts
pub mod constants;

/// `SQLite` storage
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Shelf-life table, inventory, command parser, and reminders
pub mod inventory;

/// LINE Messaging API client and webhook types
pub mod line;

/// LLM provider abstraction for photo identification and chat
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Domain models
pub mod models;

/// Recipe website search
pub mod recipes;

/// HTTP routes
pub mod routes;

/// Server assembly and graceful shutdown
pub mod server;
