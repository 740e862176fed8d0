// ABOUTME: Prompts for the fridge assistant loaded at compile time
// ABOUTME: Food identification, persona chat, and recipe recommendation prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.
//! Every request built here uses the same generation settings.

use super::{ChatMessage, ChatRequest, ImageInput};

/// Photo identification prompt; the model answers `名稱 數量 ...` or `錯誤`
pub const IDENTIFY_FOOD_PROMPT: &str = include_str!("identify_food.md");

/// Persona for free-form chat
pub const FRIDGE_PERSONA_PROMPT: &str = include_str!("fridge_persona.md");

/// Recipe recommendation template; `{ingredients}` is replaced
pub const RECIPE_RECOMMENDATION_TEMPLATE: &str = include_str!("recipe_recommendation.md");

/// Answer the identification prompt uses for "no food"
pub const NOT_FOOD_ANSWER: &str = "錯誤";

const MAX_OUTPUT_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 0.95;

fn with_generation_config(request: ChatRequest) -> ChatRequest {
    request
        .with_max_tokens(MAX_OUTPUT_TOKENS)
        .with_temperature(TEMPERATURE)
        .with_top_p(TOP_P)
}

/// Request asking the model to list the food in a photo
#[must_use]
pub fn identify_food_request(image: ImageInput) -> ChatRequest {
    with_generation_config(ChatRequest::new(vec![
        ChatMessage::user(IDENTIFY_FOOD_PROMPT.trim()).with_image(image)
    ]))
}

/// Request answering a user question in the fridge persona
#[must_use]
pub fn persona_chat_request(question: &str) -> ChatRequest {
    with_generation_config(ChatRequest::new(vec![
        ChatMessage::system(FRIDGE_PERSONA_PROMPT.trim()),
        ChatMessage::user(question),
    ]))
}

/// Request for recipe ideas from the given ingredient names
#[must_use]
pub fn recipe_recommendation_request(ingredients: &[String]) -> ChatRequest {
    let prompt = RECIPE_RECOMMENDATION_TEMPLATE
        .trim()
        .replace("{ingredients}", &ingredients.join("、"));
    with_generation_config(ChatRequest::new(vec![ChatMessage::user(prompt)]))
}

/// Whether an identification answer means the photo had no food
#[must_use]
pub fn is_not_food_answer(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.starts_with(NOT_FOOD_ANSWER)
}
