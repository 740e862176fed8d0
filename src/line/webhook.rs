// ABOUTME: LINE webhook payload types and X-Line-Signature validation
// ABOUTME: Signatures are base64 HMAC-SHA256 of the raw body keyed by the channel secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! LINE webhook
//!
//! ## Security
//!
//! Every webhook request carries an `x-line-signature` header. The body must
//! not be parsed until the signature has been checked against the raw bytes.
//!
//! ## Event Types
//!
//! Only `message` events are modelled; every other event type deserializes
//! to [`WebhookEvent::Other`] and is ignored.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ring::hmac;
use serde::Deserialize;

/// Webhook signature validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureValidation {
    /// Signature is valid
    Valid,
    /// Signature is invalid
    Invalid,
    /// Signature header is missing
    Missing,
    /// No channel secret configured
    NotConfigured,
}

/// Validates LINE webhook signatures
pub struct WebhookSignatureValidator {
    channel_secret: String,
}

impl WebhookSignatureValidator {
    /// Create a validator for a channel secret
    #[must_use]
    pub const fn new(channel_secret: String) -> Self {
        Self { channel_secret }
    }

    /// Validate a webhook request signature
    ///
    /// # Arguments
    /// * `signature_header` - Value of the `x-line-signature` header
    /// * `body` - Raw request body bytes
    #[must_use]
    pub fn validate(&self, signature_header: Option<&str>, body: &[u8]) -> SignatureValidation {
        let Some(signature) = signature_header else {
            return SignatureValidation::Missing;
        };
        if self.channel_secret.is_empty() {
            return SignatureValidation::NotConfigured;
        }

        let key = hmac::Key::new(hmac::HMAC_SHA256, self.channel_secret.as_bytes());
        let expected = BASE64.encode(hmac::sign(&key, body).as_ref());

        if subtle::ConstantTimeEq::ct_eq(signature.trim().as_bytes(), expected.as_bytes()).into() {
            SignatureValidation::Valid
        } else {
            SignatureValidation::Invalid
        }
    }
}

/// Body of a webhook request
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user id the events are addressed to
    #[serde(default)]
    pub destination: Option<String>,
    /// Events, possibly empty (LINE sends an empty list to verify the URL)
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A webhook event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    /// A user sent a message
    Message(MessageEvent),
    /// Follow, unfollow, postback and the rest
    #[serde(other)]
    Other,
}

/// Message event body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Single-use token for answering this event
    #[serde(default)]
    pub reply_token: Option<String>,
    /// Sender
    pub source: EventSource,
    /// Message payload
    pub message: EventMessage,
    /// Event time in milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
}

/// Sender of an event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    /// `user`, `group` or `room`
    #[serde(rename = "type")]
    pub kind: String,
    /// Sending user, absent for some group events
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Message payloads
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventMessage {
    /// Text message
    Text {
        /// Message id
        id: String,
        /// Message text
        text: String,
    },
    /// Image message; the bytes are fetched separately
    Image {
        /// Message id used to download the content
        id: String,
    },
    /// Stickers, video, audio, location and the rest
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
        BASE64.encode(hmac::sign(&key, body).as_ref())
    }

    #[test]
    fn test_signature_validation() {
        let validator = WebhookSignatureValidator::new("channel-secret".to_owned());
        let body = br#"{"events":[]}"#;
        let signature = sign("channel-secret", body);

        assert_eq!(
            validator.validate(Some(&signature), body),
            SignatureValidation::Valid
        );
        assert_eq!(
            validator.validate(Some(&sign("other-secret", body)), body),
            SignatureValidation::Invalid
        );
        assert_eq!(
            validator.validate(Some(&signature), br#"{"events":[{}]}"#),
            SignatureValidation::Invalid
        );
        assert_eq!(validator.validate(None, body), SignatureValidation::Missing);
    }

    #[test]
    fn test_empty_secret_is_not_configured() {
        let validator = WebhookSignatureValidator::new(String::new());
        assert_eq!(
            validator.validate(Some("abc"), b"{}"),
            SignatureValidation::NotConfigured
        );
    }

    #[test]
    fn test_payload_parsing() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{
                "destination": "U0bot",
                "events": [
                    {
                        "type": "message",
                        "replyToken": "token-1",
                        "timestamp": 1700000000000,
                        "source": {"type": "user", "userId": "U123"},
                        "message": {"type": "text", "id": "m1", "text": "查詢冰箱", "quoteToken": "q"}
                    },
                    {
                        "type": "message",
                        "replyToken": "token-2",
                        "source": {"type": "user", "userId": "U123"},
                        "message": {"type": "image", "id": "m2", "contentProvider": {"type": "line"}}
                    },
                    {
                        "type": "message",
                        "replyToken": "token-3",
                        "source": {"type": "user", "userId": "U123"},
                        "message": {"type": "sticker", "id": "m3", "packageId": "1", "stickerId": "2"}
                    },
                    {"type": "follow", "replyToken": "token-4", "source": {"type": "user", "userId": "U123"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.events.len(), 4);
        match &payload.events[0] {
            WebhookEvent::Message(event) => {
                assert_eq!(event.reply_token.as_deref(), Some("token-1"));
                assert_eq!(event.source.user_id.as_deref(), Some("U123"));
                assert!(matches!(&event.message, EventMessage::Text { text, .. } if text == "查詢冰箱"));
            }
            WebhookEvent::Other => panic!("expected message event"),
        }
        assert!(matches!(
            &payload.events[1],
            WebhookEvent::Message(MessageEvent { message: EventMessage::Image { id }, .. }) if id == "m2"
        ));
        assert!(matches!(
            &payload.events[2],
            WebhookEvent::Message(MessageEvent { message: EventMessage::Other, .. })
        ));
        assert!(matches!(payload.events[3], WebhookEvent::Other));
    }
}
