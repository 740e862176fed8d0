// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! Environment-based configuration management for production deployment

use crate::constants::{inventory, line, network, recipes, reminder, time};
use anyhow::{Context, Result};
use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else if path_str.is_empty() {
                Err(anyhow::anyhow!("DATABASE_URL has an empty SQLite path"))
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(anyhow::anyhow!(
                "Unsupported DATABASE_URL scheme, only sqlite is supported: {s}"
            ))
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/fridge.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// LINE Messaging API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Long-lived channel access token
    #[serde(skip_serializing)]
    pub channel_access_token: String,
    /// Channel secret used for webhook signatures
    #[serde(skip_serializing)]
    pub channel_secret: String,
    /// Messaging API base URL
    pub api_base: String,
    /// Content download base URL
    pub data_api_base: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_access_token: String::new(),
            channel_secret: String::new(),
            api_base: line::DEFAULT_API_BASE.to_owned(),
            data_api_base: line::DEFAULT_DATA_API_BASE.to_owned(),
        }
    }
}

/// Gemini configuration; AI features are disabled without a key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model override
    pub model: Option<String>,
}

impl GeminiConfig {
    /// Whether AI features can be used
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Recipe website search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSearchConfig {
    /// Website base URL
    pub base_url: String,
    /// Results kept per search
    pub result_limit: usize,
    /// In-memory cache lifetime in seconds
    pub cache_ttl_secs: u64,
}

impl Default for RecipeSearchConfig {
    fn default() -> Self {
        Self {
            base_url: recipes::DEFAULT_SEARCH_BASE_URL.to_owned(),
            result_limit: recipes::DEFAULT_RESULT_LIMIT,
            cache_ttl_secs: recipes::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Expiry reminder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Run the background scheduler
    pub enabled: bool,
    /// Seconds between scans
    pub interval_secs: u64,
    /// Expiry horizon in hours
    pub horizon_hours: i64,
    /// UTC offset used for dates shown to users
    pub display_utc_offset_hours: i32,
}

impl ReminderConfig {
    /// Scan horizon as a duration
    #[must_use]
    pub fn horizon(&self) -> Duration {
        Duration::hours(self.horizon_hours)
    }

    /// Display time zone; falls back to UTC for out-of-range offsets
    #[must_use]
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display_utc_offset_hours * time::SECS_PER_HOUR)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: reminder::DEFAULT_INTERVAL_SECS,
            horizon_hours: reminder::DEFAULT_HORIZON_HOURS,
            display_utc_offset_hours: reminder::DEFAULT_DISPLAY_UTC_OFFSET_HOURS,
        }
    }
}

/// Inventory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Shelf life given to unknown food names
    pub default_shelf_life_days: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_shelf_life_days: inventory::DEFAULT_SHELF_LIFE_DAYS,
        }
    }
}

/// Sensor upload configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Token devices must send; uploads are open when unset
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Outbound HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Database configuration
    pub database: DatabaseConfig,
    /// LINE Messaging API
    pub line: LineConfig,
    /// Gemini
    pub gemini: GeminiConfig,
    /// Recipe search
    pub recipes: RecipeSearchConfig,
    /// Expiry reminders
    pub reminder: ReminderConfig,
    /// Inventory defaults
    pub inventory: InventoryConfig,
    /// Sensor uploads
    pub sensors: SensorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_HOST.to_owned(),
            http_port: network::DEFAULT_HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            request_timeout_secs: network::DEFAULT_REQUEST_TIMEOUT_SECS,
            database: DatabaseConfig::default(),
            line: LineConfig::default(),
            gemini: GeminiConfig::default(),
            recipes: RecipeSearchConfig::default(),
            reminder: ReminderConfig::default(),
            inventory: InventoryConfig::default(),
            sensors: SensorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            host: env_var_or("HOST", network::DEFAULT_HOST),
            http_port: env_var_or("HTTP_PORT", &network::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            request_timeout_secs: env_var_or(
                "REQUEST_TIMEOUT_SECS",
                &network::DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid REQUEST_TIMEOUT_SECS value")?,

            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", "sqlite:./data/fridge.db"))?,
            },

            line: LineConfig {
                channel_access_token: env_var_or("LINE_CHANNEL_ACCESS_TOKEN", ""),
                channel_secret: env_var_or("LINE_CHANNEL_SECRET", ""),
                api_base: env_var_or("LINE_API_BASE", line::DEFAULT_API_BASE),
                data_api_base: env_var_or("LINE_DATA_API_BASE", line::DEFAULT_DATA_API_BASE),
            },

            gemini: GeminiConfig {
                api_key: optional_env_var("GEMINI_API_KEY"),
                model: optional_env_var("GEMINI_MODEL"),
            },

            recipes: RecipeSearchConfig {
                base_url: env_var_or("RECIPE_SEARCH_BASE_URL", recipes::DEFAULT_SEARCH_BASE_URL),
                result_limit: env_var_or(
                    "RECIPE_RESULT_LIMIT",
                    &recipes::DEFAULT_RESULT_LIMIT.to_string(),
                )
                .parse()
                .context("Invalid RECIPE_RESULT_LIMIT value")?,
                cache_ttl_secs: env_var_or(
                    "RECIPE_CACHE_TTL_SECS",
                    &recipes::DEFAULT_CACHE_TTL_SECS.to_string(),
                )
                .parse()
                .context("Invalid RECIPE_CACHE_TTL_SECS value")?,
            },

            reminder: ReminderConfig {
                enabled: env_var_or("REMINDER_ENABLED", "true")
                    .parse()
                    .context("Invalid REMINDER_ENABLED value")?,
                interval_secs: env_var_or(
                    "REMINDER_INTERVAL_SECS",
                    &reminder::DEFAULT_INTERVAL_SECS.to_string(),
                )
                .parse()
                .context("Invalid REMINDER_INTERVAL_SECS value")?,
                horizon_hours: env_var_or(
                    "REMINDER_HORIZON_HOURS",
                    &reminder::DEFAULT_HORIZON_HOURS.to_string(),
                )
                .parse()
                .context("Invalid REMINDER_HORIZON_HOURS value")?,
                display_utc_offset_hours: env_var_or(
                    "DISPLAY_UTC_OFFSET_HOURS",
                    &reminder::DEFAULT_DISPLAY_UTC_OFFSET_HOURS.to_string(),
                )
                .parse()
                .context("Invalid DISPLAY_UTC_OFFSET_HOURS value")?,
            },

            inventory: InventoryConfig {
                default_shelf_life_days: env_var_or(
                    "DEFAULT_SHELF_LIFE_DAYS",
                    &inventory::DEFAULT_SHELF_LIFE_DAYS.to_string(),
                )
                .parse()
                .context("Invalid DEFAULT_SHELF_LIFE_DAYS value")?,
            },

            sensors: SensorConfig {
                api_token: optional_env_var("SENSOR_API_TOKEN"),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for zero intervals, horizons, or limits and for
    /// out-of-range display offsets
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT must not be 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be positive"));
        }
        if self.reminder.interval_secs == 0 {
            return Err(anyhow::anyhow!("REMINDER_INTERVAL_SECS must be positive"));
        }
        if self.reminder.horizon_hours <= 0 {
            return Err(anyhow::anyhow!("REMINDER_HORIZON_HOURS must be positive"));
        }
        if !(-12..=14).contains(&self.reminder.display_utc_offset_hours) {
            return Err(anyhow::anyhow!(
                "DISPLAY_UTC_OFFSET_HOURS must be between -12 and 14"
            ));
        }
        if self.recipes.result_limit == 0 {
            return Err(anyhow::anyhow!("RECIPE_RESULT_LIMIT must be positive"));
        }
        if self.inventory.default_shelf_life_days == 0 {
            return Err(anyhow::anyhow!("DEFAULT_SHELF_LIFE_DAYS must be positive"));
        }

        if self.line.channel_secret.is_empty() || self.line.channel_access_token.is_empty() {
            if self.environment.is_production() {
                return Err(anyhow::anyhow!(
                    "LINE_CHANNEL_SECRET and LINE_CHANNEL_ACCESS_TOKEN are required in production"
                ));
            }
            warn!("LINE channel credentials are not set; webhook signatures will not be verified");
        }

        if !self.gemini.is_enabled() {
            warn!("GEMINI_API_KEY is not set; photo recognition and AI chat are disabled");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Fridge Companion Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - LINE Credentials: {}\n\
             - Gemini: {}\n\
             - Recipe Search: {} (limit {}, cache {}s)\n\
             - Reminders: {} (every {}s, horizon {}h, UTC{:+})\n\
             - Default Shelf Life: {} days\n\
             - Sensor Token: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            if self.database.url.is_memory() {
                "SQLite (memory)"
            } else {
                "SQLite"
            },
            if self.line.channel_secret.is_empty() {
                "Missing"
            } else {
                "Configured"
            },
            if self.gemini.is_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.recipes.base_url,
            self.recipes.result_limit,
            self.recipes.cache_ttl_secs,
            if self.reminder.enabled {
                "Enabled"
            } else {
                "Disabled"
            },
            self.reminder.interval_secs,
            self.reminder.horizon_hours,
            self.reminder.display_utc_offset_hours,
            self.inventory.default_shelf_life_days,
            if self.sensors.api_token.is_some() {
                "Required"
            } else {
                "Open"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a non-empty environment variable
fn optional_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
