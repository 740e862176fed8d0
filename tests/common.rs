// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, recording mocks for LINE, Gemini, and recipe search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `fridge_companion`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use fridge_companion::{
    bot::BotService,
    config::{ReminderConfig, ServerConfig},
    constants::inventory::DEFAULT_SHELF_LIFE_DAYS,
    database::Database,
    errors::{AppError, AppResult},
    inventory::{Inventory, ShelfLifeTable},
    line::{MessageContent, MessagingClient, OutboundMessage, UserProfile},
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider},
    models::{Recipe, User},
    recipes::RecipeSource,
    server::ServerResources,
};
use ring::hmac;
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Channel secret used by signed webhook tests
pub const TEST_CHANNEL_SECRET: &str = "test-channel-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Seeded shelf-life table and inventory over a fresh database
pub async fn create_test_inventory() -> Result<(Database, Inventory)> {
    let database = create_test_database().await?;
    let shelf_life = ShelfLifeTable::new(&database, DEFAULT_SHELF_LIFE_DAYS);
    shelf_life.seed_defaults().await?;
    let inventory = Inventory::new(&database, shelf_life);
    Ok((database, inventory))
}

/// Fixed reference time for deterministic expiry math
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 4, 0, 0).unwrap()
}

/// Create a user with a unique platform id
pub async fn create_test_user(database: &Database, line_id: &str) -> Result<User> {
    Ok(database.create_user(line_id, "Tester", test_now()).await?)
}

/// Compute the `x-line-signature` value for a body
pub fn sign_body(secret: &str, body: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    BASE64.encode(hmac::sign(&key, body).as_ref())
}

// ============================================================================
// Mock Messaging Client
// ============================================================================

/// Messaging client that records everything sent through it
pub struct MockMessaging {
    replies: Mutex<Vec<(String, Vec<OutboundMessage>)>>,
    pushes: Mutex<Vec<(String, Vec<OutboundMessage>)>>,
    display_name: Option<String>,
    image: Vec<u8>,
    fail_pushes_to: Option<String>,
    fail_downloads: bool,
}

impl MockMessaging {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            pushes: Mutex::new(Vec::new()),
            display_name: Some("小明".to_owned()),
            image: vec![0xFF, 0xD8, 0xFF],
            fail_pushes_to: None,
            fail_downloads: false,
        }
    }

    /// Profile lookups fail, exercising the fallback display name
    pub fn without_profile(mut self) -> Self {
        self.display_name = None;
        self
    }

    /// Pushes to this recipient fail
    pub fn failing_pushes_to(mut self, recipient: &str) -> Self {
        self.fail_pushes_to = Some(recipient.to_owned());
        self
    }

    /// Message content downloads fail
    pub fn failing_downloads(mut self) -> Self {
        self.fail_downloads = true;
        self
    }

    pub fn replies(&self) -> Vec<(String, Vec<OutboundMessage>)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn pushes(&self) -> Vec<(String, Vec<OutboundMessage>)> {
        self.pushes.lock().unwrap().clone()
    }

    /// Text of every replied message, in order
    pub fn reply_texts(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .flat_map(|(_, messages)| messages)
            .filter_map(|message| message.as_text().map(str::to_owned))
            .collect()
    }
}

#[async_trait]
impl MessagingClient for MockMessaging {
    async fn reply(&self, reply_token: &str, messages: &[OutboundMessage]) -> AppResult<()> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_owned(), messages.to_vec()));
        Ok(())
    }

    async fn push(&self, to: &str, messages: &[OutboundMessage]) -> AppResult<()> {
        if self.fail_pushes_to.as_deref() == Some(to) {
            return Err(AppError::external_service("LINE", "push rejected"));
        }
        self.pushes
            .lock()
            .unwrap()
            .push((to.to_owned(), messages.to_vec()));
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        self.display_name.as_ref().map_or_else(
            || Err(AppError::external_service("LINE", "profile unavailable")),
            |name| {
                Ok(UserProfile {
                    user_id: user_id.to_owned(),
                    display_name: name.clone(),
                    picture_url: None,
                })
            },
        )
    }

    async fn get_message_content(&self, message_id: &str) -> AppResult<MessageContent> {
        if self.fail_downloads {
            return Err(AppError::external_service(
                "LINE",
                format!("content {message_id} unavailable"),
            ));
        }
        Ok(MessageContent {
            data: Bytes::from(self.image.clone()),
            content_type: "image/jpeg".to_owned(),
        })
    }
}

// ============================================================================
// Mock LLM Provider
// ============================================================================

/// LLM provider answering every request with a fixed text
pub struct MockLlm {
    answer: String,
    capabilities: LlmCapabilities,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_owned(),
            capabilities: LlmCapabilities::full_featured(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text_only(answer: &str) -> Self {
        Self {
            capabilities: LlmCapabilities::text_only(),
            ..Self::answering(answer)
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock LLM"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ChatResponse {
            content: self.answer.clone(),
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

// ============================================================================
// Mock Recipe Source
// ============================================================================

/// Recipe source returning canned results
pub struct MockRecipes {
    recipes: Vec<Recipe>,
    searches: Mutex<Vec<String>>,
}

impl MockRecipes {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeSource for MockRecipes {
    async fn search(&self, keywords: &str) -> AppResult<Vec<Recipe>> {
        self.searches.lock().unwrap().push(keywords.to_owned());
        Ok(self.recipes.clone())
    }
}

// ============================================================================
// Service Assembly
// ============================================================================

/// Bot service over a fresh inventory with the given collaborators
pub async fn create_test_bot(
    messaging: Arc<MockMessaging>,
    recipes: Arc<MockRecipes>,
    llm: Option<Arc<MockLlm>>,
) -> Result<(Database, BotService)> {
    let (database, inventory) = create_test_inventory().await?;
    let mut bot = BotService::new(
        database.clone(),
        inventory,
        messaging,
        recipes,
        &ReminderConfig::default(),
    );
    if let Some(llm) = llm {
        bot = bot.with_llm(llm);
    }
    Ok((database, bot))
}

/// Server resources with a signed webhook and the given sensor token
pub async fn create_test_server_resources(
    messaging: Arc<MockMessaging>,
    sensor_token: Option<&str>,
) -> Result<Arc<ServerResources>> {
    let (database, bot) =
        create_test_bot(messaging, Arc::new(MockRecipes::empty()), None).await?;

    let mut config = ServerConfig::default();
    config.line.channel_secret = TEST_CHANNEL_SECRET.to_owned();
    config.line.channel_access_token = "test-access-token".to_owned();
    config.sensors.api_token = sensor_token.map(str::to_owned);
    config.reminder.enabled = false;

    Ok(Arc::new(ServerResources::new(
        Arc::new(config),
        database,
        bot,
    )))
}
