// ABOUTME: Route module organization for the fridge companion HTTP endpoints
// ABOUTME: Each domain module holds route definitions and thin handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! Route module
//!
//! Handlers stay thin and delegate to the bot service or the database.

/// Health check and readiness routes
pub mod health;
/// Sensor telemetry routes
pub mod sensors;
/// LINE webhook routes
pub mod webhook;

pub use health::HealthRoutes;
pub use sensors::SensorRoutes;
pub use webhook::WebhookRoutes;
