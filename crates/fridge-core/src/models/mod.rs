// ABOUTME: Core data models for the fridge companion bot
// ABOUTME: Re-exports users, food entries, shelf-life entries, telemetry, and recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Data Models
//!
//! Plain data carried between the storage layer, the inventory core, and the
//! chat adapters. None of these types perform I/O.
//!
//! ## Core Models
//!
//! - `User`: a chat-platform identity that owns a virtual fridge
//! - `ShelfLifeEntry`: default shelf life for a food name
//! - `FoodEntry`: one food name with its quantity and expiry for one user
//! - `SensorReading` / `Device`: fridge telemetry from the microcontroller
//! - `Recipe`: a search result from the recipe website

mod food;
mod recipe;
mod sensor;
mod user;

// Inventory domain
pub use food::{AddOutcome, FoodEntry, FoodQuantity, RemoveAmount, RemoveOutcome, ShelfLifeEntry};

// Recipe domain
pub use recipe::Recipe;

// Telemetry domain
pub use sensor::{Device, NewSensorReading, SensorReading};

// Identity domain
pub use user::User;
