// ABOUTME: Free-text chat command recognition through exact and prefix keyword tables
// ABOUTME: Pure parsing into BotCommand; no storage or network access happens here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Chat Commands
//!
//! A message is first matched as a whole against the exact keywords (menu
//! entries such as `查詢冰箱`). Otherwise its first whitespace-separated token
//! is looked up in the prefix table and the remaining tokens become the
//! arguments (`新增 蘋果 3`).

use thiserror::Error;

use crate::constants::replies;
use crate::errors::AppError;
use crate::inventory::{parse_food_quantities, tokenize, MalformedCommand};
use crate::models::FoodQuantity;

/// A recognized chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// `新增食物`: offer text or photo entry
    AddFoodMenu,
    /// `文字輸入新增食物`: explain the text add syntax
    AddByTextUsage,
    /// `圖片辨識新增食物`: ask for a photo
    AddByPhotoPrompt,
    /// `查詢冰箱`: list the fridge
    ListFridge,
    /// `查詢食譜`: explain the recipe search syntax
    RecipeUsage,
    /// `即將過期`: entries expiring within the reminder horizon
    ExpiringSoon,
    /// `冰箱狀態`: latest sensor reading
    FridgeStatus,
    /// `推薦食譜`: AI recipe ideas from the fridge contents
    RecommendRecipes,
    /// `使用說明`
    Help,
    /// `新增 名稱 [數量] ...`
    Add(Vec<FoodQuantity>),
    /// `刪除 名稱 [數量] ...`
    Remove(Vec<FoodQuantity>),
    /// `清除 名稱 ...`
    Clear(Vec<String>),
    /// `查詢 關鍵字 ...`
    SearchRecipes(String),
    /// `綁定 裝置編號`
    BindDevice(String),
    /// `小冰 ...`
    Chat(String),
}

/// Why a message is not a runnable command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Arguments could not be parsed into food quantities
    #[error(transparent)]
    Malformed(#[from] MalformedCommand),
    /// A prefix keyword without the arguments it needs
    #[error("missing argument: {usage}")]
    MissingArgument {
        /// Usage text shown to the user
        usage: &'static str,
    },
    /// No keyword matched
    #[error("unrecognized command")]
    Unrecognized,
}

impl CommandError {
    /// Reply text for the user
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Malformed(_) => replies::MALFORMED_COMMAND,
            Self::MissingArgument { usage } => *usage,
            Self::Unrecognized => replies::UNKNOWN_COMMAND,
        }
    }
}

impl From<CommandError> for AppError {
    fn from(error: CommandError) -> Self {
        Self::invalid_input(error.to_string())
    }
}

type PrefixHandler = fn(&str, &[&str]) -> Result<BotCommand, CommandError>;

const EXACT_COMMANDS: &[(&str, BotCommand)] = &[
    ("新增食物", BotCommand::AddFoodMenu),
    ("文字輸入新增食物", BotCommand::AddByTextUsage),
    ("圖片辨識新增食物", BotCommand::AddByPhotoPrompt),
    ("查詢冰箱", BotCommand::ListFridge),
    ("查詢食譜", BotCommand::RecipeUsage),
    ("即將過期", BotCommand::ExpiringSoon),
    ("冰箱狀態", BotCommand::FridgeStatus),
    ("推薦食譜", BotCommand::RecommendRecipes),
    ("使用說明", BotCommand::Help),
];

const PREFIX_COMMANDS: &[(&str, PrefixHandler)] = &[
    ("新增", parse_add),
    ("刪除", parse_remove),
    ("清除", parse_clear),
    ("查詢", parse_search),
    ("綁定", parse_bind),
    ("小冰", parse_chat),
];

impl BotCommand {
    /// Recognize a chat message
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when no keyword matches, when a prefix keyword
    /// has no arguments, or when food quantities are malformed
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let text = text.trim();

        if let Some((_, command)) = EXACT_COMMANDS.iter().find(|(keyword, _)| *keyword == text) {
            return Ok(command.clone());
        }

        let tokens = tokenize(text);
        let Some((&keyword, args)) = tokens.split_first() else {
            return Err(CommandError::Unrecognized);
        };

        let (_, parse_args) = PREFIX_COMMANDS
            .iter()
            .find(|(prefix, _)| *prefix == keyword)
            .ok_or(CommandError::Unrecognized)?;

        let rest = text[keyword.len()..].trim();
        parse_args(rest, args)
    }
}

const fn require_args(args: &[&str], usage: &'static str) -> Result<(), CommandError> {
    if args.is_empty() {
        Err(CommandError::MissingArgument { usage })
    } else {
        Ok(())
    }
}

fn parse_add(_rest: &str, args: &[&str]) -> Result<BotCommand, CommandError> {
    require_args(args, replies::ADD_MISSING_ARGUMENT)?;
    Ok(BotCommand::Add(parse_food_quantities(args)?))
}

fn parse_remove(_rest: &str, args: &[&str]) -> Result<BotCommand, CommandError> {
    require_args(args, replies::REMOVE_USAGE)?;
    Ok(BotCommand::Remove(parse_food_quantities(args)?))
}

fn parse_clear(_rest: &str, args: &[&str]) -> Result<BotCommand, CommandError> {
    require_args(args, replies::CLEAR_USAGE)?;
    Ok(BotCommand::Clear(
        args.iter().map(|name| (*name).to_owned()).collect(),
    ))
}

fn parse_search(_rest: &str, args: &[&str]) -> Result<BotCommand, CommandError> {
    require_args(args, replies::RECIPE_USAGE)?;
    Ok(BotCommand::SearchRecipes(args.join(" ")))
}

fn parse_bind(_rest: &str, args: &[&str]) -> Result<BotCommand, CommandError> {
    match args {
        [device_id] => Ok(BotCommand::BindDevice((*device_id).to_owned())),
        _ => Err(CommandError::MissingArgument {
            usage: replies::BIND_USAGE,
        }),
    }
}

fn parse_chat(rest: &str, args: &[&str]) -> Result<BotCommand, CommandError> {
    require_args(args, replies::CHAT_USAGE)?;
    Ok(BotCommand::Chat(rest.to_owned()))
}
