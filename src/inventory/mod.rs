// ABOUTME: Food inventory core: shelf-life table, per-user inventory, parser, and reminders
// ABOUTME: Storage-backed state machine that every chat command ends up calling into
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Inventory
//!
//! - [`ShelfLifeTable`]: food name to default shelf life, extended lazily
//! - [`Inventory`]: per-user food entries with add, remove, list, and
//!   expiring-soon queries
//! - [`parse_food_quantities`]: `name [quantity]` token sequences
//! - [`ReminderJob`] / [`ReminderScheduler`]: periodic expiry notifications
//!
//! Operations that depend on the current time take `now` explicitly so the
//! behavior can be tested against fixed instants.

mod parser;
mod reminder;
mod shelf_life;
mod store;

pub use parser::{parse_food_quantities, tokenize, MalformedCommand};
pub use reminder::{
    deliver_reminders, format_reminder, ReminderJob, ReminderNotification, ReminderScheduler,
};
pub use shelf_life::ShelfLifeTable;
pub use store::Inventory;
