// ABOUTME: Chat event handling: user onboarding, command execution, and photo identification
// ABOUTME: Turns webhook message events into replies sent through the messaging client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use tracing::{debug, error, info, instrument, warn};

use super::command::{BotCommand, CommandError};
use super::replies as render;
use crate::config::ReminderConfig;
use crate::constants::{replies, service::FALLBACK_DISPLAY_NAME};
use crate::database::Database;
use crate::errors::{AppError, AppResult, InventoryError};
use crate::inventory::{parse_food_quantities, tokenize, Inventory};
use crate::line::{EventMessage, MessageEvent, MessagingClient, OutboundMessage, WebhookEvent};
use crate::llm::{prompts, ImageInput, LlmProvider};
use crate::models::{FoodQuantity, RemoveAmount, User};
use crate::recipes::RecipeSource;

/// Chat front end over the inventory and its collaborators
#[derive(Clone)]
pub struct BotService {
    db: Database,
    inventory: Inventory,
    messaging: Arc<dyn MessagingClient>,
    recipes: Arc<dyn RecipeSource>,
    llm: Option<Arc<dyn LlmProvider>>,
    horizon: Duration,
    display_offset: FixedOffset,
}

impl BotService {
    /// Create a service without AI features
    #[must_use]
    pub fn new(
        db: Database,
        inventory: Inventory,
        messaging: Arc<dyn MessagingClient>,
        recipes: Arc<dyn RecipeSource>,
        reminder: &ReminderConfig,
    ) -> Self {
        Self {
            db,
            inventory,
            messaging,
            recipes,
            llm: None,
            horizon: reminder.horizon(),
            display_offset: reminder.display_offset(),
        }
    }

    /// Enable photo identification, recipe suggestions and chat
    #[must_use]
    pub fn with_llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Handle every event of a webhook delivery
    ///
    /// A failing event is logged and answered with an apology; the remaining
    /// events are still processed. Returns the number of events answered.
    pub async fn handle_events(&self, events: &[WebhookEvent]) -> usize {
        let mut answered = 0;
        for event in events {
            match event {
                WebhookEvent::Message(message_event) => {
                    if self.handle_message_event(message_event, Utc::now()).await {
                        answered += 1;
                    }
                }
                WebhookEvent::Other => debug!("Ignoring non-message webhook event"),
            }
        }
        answered
    }

    async fn handle_message_event(&self, event: &MessageEvent, now: DateTime<Utc>) -> bool {
        let (Some(reply_token), Some(line_id)) =
            (event.reply_token.as_deref(), event.source.user_id.as_deref())
        else {
            debug!("Message event without reply token or user id");
            return false;
        };

        let messages = match self.respond(line_id, &event.message, now).await {
            Ok(messages) => messages,
            Err(e) => {
                error!(line_id = %line_id, error = %e, "Failed to handle message event");
                vec![OutboundMessage::text(replies::APOLOGY)]
            }
        };

        match self.messaging.reply(reply_token, &messages).await {
            Ok(()) => true,
            Err(e) => {
                warn!(line_id = %line_id, error = %e, "Failed to send reply");
                false
            }
        }
    }

    /// Replies for one inbound message
    ///
    /// The first message from an unknown sender creates their fridge and is
    /// answered with a greeting only.
    ///
    /// # Errors
    ///
    /// Returns an error on storage or external service failure
    #[instrument(skip(self, message, now))]
    pub async fn respond(
        &self,
        line_id: &str,
        message: &EventMessage,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<OutboundMessage>> {
        let Some(user) = self.db.get_user_by_line_id(line_id).await? else {
            return self.onboard(line_id, now).await;
        };

        let reply = match message {
            EventMessage::Text { text, .. } => match BotCommand::parse(text) {
                Ok(command) => return self.execute(&user, command, now).await,
                Err(e) => {
                    debug!(error = %e, "Command not recognized");
                    command_error_reply(&e)
                }
            },
            EventMessage::Image { id } => self.identify_photo(&user, id, now).await?,
            EventMessage::Other => replies::UNSUPPORTED_MESSAGE.to_owned(),
        };

        Ok(vec![OutboundMessage::text(reply)])
    }

    async fn onboard(&self, line_id: &str, now: DateTime<Utc>) -> AppResult<Vec<OutboundMessage>> {
        let display_name = match self.messaging.get_profile(line_id).await {
            Ok(profile) => profile.display_name,
            Err(e) => {
                warn!(error = %e, "Profile lookup failed, using fallback name");
                FALLBACK_DISPLAY_NAME.to_owned()
            }
        };

        let user = self.db.create_user(line_id, &display_name, now).await?;
        info!(user_id = user.id, "Created fridge for new user");

        Ok(vec![OutboundMessage::text(
            replies::WELCOME_TEMPLATE.replace("{name}", &user.display_name),
        )])
    }

    /// Run a parsed command for a user
    ///
    /// # Errors
    ///
    /// Returns an error on storage or external service failure; user mistakes
    /// such as removing food that is not there are answered, not returned
    #[instrument(skip(self, user, now), fields(user_id = user.id))]
    pub async fn execute(
        &self,
        user: &User,
        command: BotCommand,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<OutboundMessage>> {
        let reply = match command {
            BotCommand::AddFoodMenu => return Ok(vec![render::add_food_menu()]),
            BotCommand::AddByTextUsage => replies::ADD_USAGE.to_owned(),
            BotCommand::AddByPhotoPrompt => {
                if self.vision_provider().is_some() {
                    replies::PHOTO_PROMPT.to_owned()
                } else {
                    replies::AI_UNAVAILABLE.to_owned()
                }
            }
            BotCommand::ListFridge => {
                render::fridge_list(&self.inventory.list(user.id).await?, self.display_offset)
            }
            BotCommand::RecipeUsage => replies::RECIPE_USAGE.to_owned(),
            BotCommand::ExpiringSoon => {
                let entries = self
                    .inventory
                    .expiring_within(user.id, now, self.horizon)
                    .await?;
                render::expiring_list(&entries, self.display_offset)
            }
            BotCommand::FridgeStatus => self.fridge_status(user).await?,
            BotCommand::RecommendRecipes => self.recommend_recipes(user).await?,
            BotCommand::Help => replies::HELP.to_owned(),
            BotCommand::Add(items) => self.add_items(user, &items, now).await?,
            BotCommand::Remove(items) => {
                let removals = items
                    .into_iter()
                    .map(|item| (item.name, RemoveAmount::Quantity(item.quantity)));
                self.remove_items(user, removals).await?
            }
            BotCommand::Clear(names) => {
                let removals = names.into_iter().map(|name| (name, RemoveAmount::All));
                self.remove_items(user, removals).await?
            }
            BotCommand::SearchRecipes(keywords) => {
                render::recipe_list(&self.recipes.search(&keywords).await?)
            }
            BotCommand::BindDevice(device_id) => {
                self.db.bind_device(user.id, &device_id, now).await?;
                replies::BIND_SUCCESS_TEMPLATE.replace("{device}", &device_id)
            }
            BotCommand::Chat(question) => self.chat(&question).await?,
        };

        Ok(vec![OutboundMessage::text(reply)])
    }

    async fn add_items(
        &self,
        user: &User,
        items: &[FoodQuantity],
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let result = self
                .inventory
                .add(user.id, &item.name, item.quantity, now)
                .await;
            lines.push(outcome_line(result)?);
        }
        Ok(lines.join("\n"))
    }

    async fn remove_items(
        &self,
        user: &User,
        removals: impl Iterator<Item = (String, RemoveAmount)> + Send,
    ) -> AppResult<String> {
        let mut lines = Vec::new();
        for (name, amount) in removals {
            let result = self.inventory.remove(user.id, &name, amount).await;
            lines.push(outcome_line(result)?);
        }
        Ok(lines.join("\n"))
    }

    async fn fridge_status(&self, user: &User) -> AppResult<String> {
        let Some(device_id) = user.device_id.as_deref() else {
            return Ok(replies::NO_DEVICE_BOUND.to_owned());
        };

        Ok(self
            .db
            .latest_sensor_reading(device_id)
            .await?
            .map_or_else(
                || replies::NO_SENSOR_DATA.to_owned(),
                |reading| render::sensor_status(&reading, self.display_offset),
            ))
    }

    async fn recommend_recipes(&self, user: &User) -> AppResult<String> {
        let Some(llm) = &self.llm else {
            return Ok(replies::AI_UNAVAILABLE.to_owned());
        };

        let ingredients: Vec<String> = self
            .inventory
            .list(user.id)
            .await?
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        if ingredients.is_empty() {
            return Ok(replies::RECOMMEND_NEEDS_FOOD.to_owned());
        }

        let response = llm
            .complete(&prompts::recipe_recommendation_request(&ingredients))
            .await?;
        Ok(response.content.trim().to_owned())
    }

    async fn chat(&self, question: &str) -> AppResult<String> {
        let Some(llm) = &self.llm else {
            return Ok(replies::AI_UNAVAILABLE.to_owned());
        };

        let response = llm
            .complete(&prompts::persona_chat_request(question))
            .await?;
        Ok(response.content.trim().to_owned())
    }

    fn vision_provider(&self) -> Option<&Arc<dyn LlmProvider>> {
        self.llm
            .as_ref()
            .filter(|llm| llm.capabilities().supports_vision())
    }

    /// Identify food in a photo and add what was recognized
    async fn identify_photo(
        &self,
        user: &User,
        message_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let Some(llm) = self.vision_provider() else {
            return Ok(replies::AI_UNAVAILABLE.to_owned());
        };

        let content = match self.messaging.get_message_content(message_id).await {
            Ok(content) => content,
            Err(e) => {
                warn!(user_id = user.id, message_id, error = %e, "Photo download failed");
                return Ok(replies::PHOTO_NOT_FOOD.to_owned());
            }
        };
        let image = ImageInput::new(content.content_type, content.data.to_vec());
        let answer = llm
            .complete(&prompts::identify_food_request(image))
            .await?
            .content;

        if prompts::is_not_food_answer(&answer) {
            info!(user_id = user.id, "No food recognized in photo");
            return Ok(replies::PHOTO_NOT_FOOD.to_owned());
        }

        let items = match parse_food_quantities(&tokenize(&answer)) {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => return Ok(replies::PHOTO_NOT_FOOD.to_owned()),
            Err(e) => {
                warn!(error = %e, answer = %answer, "Unparsable identification answer");
                return Ok(replies::PHOTO_NOT_FOOD.to_owned());
            }
        };

        info!(user_id = user.id, items = items.len(), "Food recognized in photo");
        self.add_items(user, &items, now).await
    }
}

/// Reply line for an inventory mutation; only storage failures propagate
fn outcome_line<T: ToString>(result: Result<T, InventoryError>) -> AppResult<String> {
    match result {
        Ok(outcome) => Ok(outcome.to_string()),
        Err(e) if e.is_user_error() => Ok(e.to_string()),
        Err(e) => Err(AppError::from(e)),
    }
}

fn command_error_reply(error: &CommandError) -> String {
    error.user_message().to_owned()
}
