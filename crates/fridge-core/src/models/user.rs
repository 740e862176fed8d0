// ABOUTME: User model linking a chat-platform identity to an internal id
// ABOUTME: Optionally bound to one telemetry device
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat user owning one virtual fridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal id
    pub id: i64,
    /// Opaque platform user id (unique)
    pub line_id: String,
    /// Display name fetched from the platform profile
    pub display_name: String,
    /// Linked telemetry device, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// When the user first talked to the bot
    pub created_at: DateTime<Utc>,
}
