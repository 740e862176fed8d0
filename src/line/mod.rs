// ABOUTME: LINE Messaging API integration: outbound message types and the client contract
// ABOUTME: Handlers and the reminder scheduler talk to LINE only through MessagingClient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # LINE Messaging
//!
//! - [`MessagingClient`]: reply, push, profile lookup and content download
//! - [`LineClient`]: the HTTP implementation over `reqwest`
//! - [`webhook`]: inbound event payloads and signature validation

mod client;
pub mod webhook;

pub use client::LineClient;
pub use webhook::{
    EventMessage, EventSource, MessageEvent, SignatureValidation, WebhookEvent, WebhookPayload,
    WebhookSignatureValidator,
};

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::line::MAX_TEXT_LENGTH;
use crate::errors::AppResult;

/// A message sent to a user, serialized in the Messaging API format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    /// Plain text
    Text {
        /// Message body
        text: String,
    },
    /// Template message such as a buttons card
    Template {
        /// Text shown where templates are not supported
        #[serde(rename = "altText")]
        alt_text: String,
        /// Template body
        template: MessageTemplate,
    },
}

impl OutboundMessage {
    /// Text message, truncated to the platform limit
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let text = if text.chars().count() > MAX_TEXT_LENGTH {
            text.chars().take(MAX_TEXT_LENGTH).collect()
        } else {
            text
        };
        Self::Text { text }
    }

    /// Buttons card; the title doubles as alt text
    #[must_use]
    pub fn buttons(
        title: impl Into<String>,
        text: impl Into<String>,
        actions: Vec<TemplateAction>,
    ) -> Self {
        let title = title.into();
        Self::Template {
            alt_text: title.clone(),
            template: MessageTemplate::Buttons {
                title,
                text: text.into(),
                actions,
            },
        }
    }

    /// Text body for text messages
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Template { .. } => None,
        }
    }
}

/// Template bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageTemplate {
    /// Title, text and up to four buttons
    Buttons {
        /// Card title
        title: String,
        /// Card body
        text: String,
        /// Buttons
        actions: Vec<TemplateAction>,
    },
}

/// Button actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateAction {
    /// Sends `text` as if the user had typed it
    Message {
        /// Button label
        label: String,
        /// Text sent on tap
        text: String,
    },
}

impl TemplateAction {
    /// Message action
    #[must_use]
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Public profile of a LINE user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// LINE user id
    #[serde(default)]
    pub user_id: String,
    /// Display name
    pub display_name: String,
    /// Profile image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Binary content attached to a message
#[derive(Debug, Clone)]
pub struct MessageContent {
    /// Raw bytes
    pub data: Bytes,
    /// MIME type reported by the platform
    pub content_type: String,
}

/// Outbound side of the chat platform
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Answer an event using its single-use reply token
    async fn reply(&self, reply_token: &str, messages: &[OutboundMessage]) -> AppResult<()>;

    /// Send to a user without a reply token
    async fn push(&self, to: &str, messages: &[OutboundMessage]) -> AppResult<()>;

    /// Look up a user's profile
    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile>;

    /// Download the content of an image message
    async fn get_message_content(&self, message_id: &str) -> AppResult<MessageContent>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_json() {
        let message = OutboundMessage::text("你好");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"type": "text", "text": "你好"})
        );
    }

    #[test]
    fn test_buttons_message_json() {
        let message = OutboundMessage::buttons(
            "新增食物",
            "你想用什麼方式增加呢?",
            vec![TemplateAction::message("文字輸入", "文字輸入新增食物")],
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "template",
                "altText": "新增食物",
                "template": {
                    "type": "buttons",
                    "title": "新增食物",
                    "text": "你想用什麼方式增加呢?",
                    "actions": [
                        {"type": "message", "label": "文字輸入", "text": "文字輸入新增食物"}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_long_text_is_truncated() {
        let message = OutboundMessage::text("冰".repeat(MAX_TEXT_LENGTH + 10));
        assert_eq!(
            message.as_text().map(|t| t.chars().count()),
            Some(MAX_TEXT_LENGTH)
        );
    }
}
