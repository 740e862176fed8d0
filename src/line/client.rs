// ABOUTME: HTTP client for the LINE Messaging API built on reqwest
// ABOUTME: Implements reply, push, profile lookup, and message content download
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::{MessageContent, MessagingClient, OutboundMessage, UserProfile};
use crate::config::LineConfig;
use crate::errors::{AppError, AppResult, ErrorCode};

const SERVICE: &str = "LINE";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [OutboundMessage],
}

#[derive(Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: &'a [OutboundMessage],
}

/// Messaging API client authenticated with a channel access token
#[derive(Clone)]
pub struct LineClient {
    http_client: Client,
    access_token: String,
    api_base: String,
    data_api_base: String,
}

impl LineClient {
    /// Build a client from the LINE configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &LineConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            access_token: config.channel_access_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            data_api_base: config.data_api_base.trim_end_matches('/').to_owned(),
        })
    }

    async fn post_json<T: Serialize + Sync>(&self, path: &str, body: &T) -> AppResult<()> {
        let url = format!("{}{path}", self.api_base);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        check_status(response).await.map(drop)
    }
}

/// Turn a non-2xx response into an error carrying the body text
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = %status, body = %body, "LINE API request failed");

    if status.as_u16() == 429 {
        return Err(AppError::new(
            ErrorCode::ExternalRateLimited,
            format!("{SERVICE}: rate limited"),
        ));
    }
    Err(AppError::external_service(
        SERVICE,
        format!("HTTP {status}: {body}"),
    ))
}

#[async_trait]
impl MessagingClient for LineClient {
    #[instrument(skip(self, reply_token, messages), fields(count = messages.len()))]
    async fn reply(&self, reply_token: &str, messages: &[OutboundMessage]) -> AppResult<()> {
        self.post_json(
            "/v2/bot/message/reply",
            &ReplyRequest {
                reply_token,
                messages,
            },
        )
        .await?;
        debug!("Reply sent");
        Ok(())
    }

    #[instrument(skip(self, messages), fields(count = messages.len()))]
    async fn push(&self, to: &str, messages: &[OutboundMessage]) -> AppResult<()> {
        self.post_json("/v2/bot/message/push", &PushRequest { to, messages })
            .await?;
        debug!("Push sent");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        let url = format!(
            "{}/v2/bot/profile/{}",
            self.api_base,
            urlencoding::encode(user_id)
        );
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        check_status(response)
            .await?
            .json::<UserProfile>()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("JSON parse error: {e}")))
    }

    #[instrument(skip(self))]
    async fn get_message_content(&self, message_id: &str) -> AppResult<MessageContent> {
        let url = format!(
            "{}/v2/bot/message/{}/content",
            self.data_api_base,
            urlencoding::encode(message_id)
        );
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()))?;

        let response = check_status(response).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_owned();
        let data = response
            .bytes()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("Failed to read content: {e}")))?;

        debug!(bytes = data.len(), content_type = %content_type, "Downloaded message content");
        Ok(MessageContent { data, content_type })
    }
}

impl Debug for LineClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LineClient")
            .field("api_base", &self.api_base)
            .field("data_api_base", &self.data_api_base)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
