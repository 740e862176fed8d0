// ABOUTME: Chat bot layer: command recognition, reply rendering, and event handling
// ABOUTME: Sits between the LINE webhook route and the inventory core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Chat Bot
//!
//! Parsing is pure ([`BotCommand::parse`]); everything that touches storage
//! or the network lives in [`BotService`].

mod command;
mod handlers;
pub mod replies;

pub use command::{BotCommand, CommandError};
pub use handlers::BotService;
