// ABOUTME: LINE webhook endpoint: signature check, payload parsing, and event dispatch
// ABOUTME: Served at /callback and at the root path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tracing::{info, warn};

use crate::constants::line::SIGNATURE_HEADER;
use crate::errors::AppError;
use crate::line::{SignatureValidation, WebhookPayload};
use crate::server::ServerResources;

/// LINE webhook routes
pub struct WebhookRoutes;

impl WebhookRoutes {
    /// Create the webhook routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/callback", post(Self::handle_callback))
            .route("/", post(Self::handle_callback))
            .with_state(resources)
    }

    /// Verify, parse, and dispatch one webhook delivery
    ///
    /// Answers 200 once the events were handled, even if some of them
    /// failed; those failures were already answered with an apology.
    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok());

        match resources.signature_validator.validate(signature, &body) {
            SignatureValidation::Valid => {}
            SignatureValidation::Missing => {
                return Err(AppError::invalid_input("Missing signature"));
            }
            SignatureValidation::Invalid => {
                warn!("Rejected webhook with invalid signature");
                return Err(AppError::invalid_input("Invalid signature"));
            }
            SignatureValidation::NotConfigured => {
                warn!("LINE channel secret not configured, accepting unsigned webhook");
            }
        }

        let payload: WebhookPayload = serde_json::from_slice(&body)
            .map_err(|e| AppError::invalid_input(format!("Invalid webhook payload: {e}")))?;

        let answered = resources.bot.handle_events(&payload.events).await;
        info!(
            events = payload.events.len(),
            answered, "Webhook delivery processed"
        );

        Ok((StatusCode::OK, "OK").into_response())
    }
}
