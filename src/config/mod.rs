// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! Configuration module for the fridge companion
//!
//! All runtime settings come from environment variables (optionally loaded
//! from a `.env` file) and are collected into one [`ServerConfig`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    DatabaseConfig, DatabaseUrl, Environment, GeminiConfig, InventoryConfig, LineConfig,
    LogLevel, RecipeSearchConfig, ReminderConfig, SensorConfig, ServerConfig,
};
