// ABOUTME: Server binary wiring configuration, storage, LINE, Gemini, and the reminder scheduler
// ABOUTME: Serves the webhook until Ctrl+C or SIGTERM, then stops the scheduler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # Fridge Companion Server Binary
//!
//! Loads configuration from the environment, prepares the database, and
//! serves the LINE webhook, telemetry, and health endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fridge_companion::{
    bot::BotService,
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    inventory::{Inventory, ReminderJob, ReminderScheduler, ShelfLifeTable},
    line::{LineClient, MessagingClient},
    llm::{GeminiProvider, LlmProvider},
    logging,
    recipes::IcookClient,
    server::{self, ServerResources},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fridge-companion-server")]
#[command(about = "Smart-fridge companion chatbot for LINE")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Fall back to defaults when argument parsing fails (e.g. in containers)
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using environment configuration only");
            Args {
                http_port: None,
                database_url: None,
            }
        }
    };

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }
    config.validate()?;

    logging::init_from_env()?;

    info!("Starting fridge companion server");
    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database.url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let database = Database::new(&config.database.url.to_connection_string()).await?;

    let shelf_life = ShelfLifeTable::new(&database, config.inventory.default_shelf_life_days);
    let seeded = shelf_life.seed_defaults().await?;
    if seeded > 0 {
        info!(seeded, "Seeded shelf-life table");
    }
    let inventory = Inventory::new(&database, shelf_life);

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let messaging: Arc<dyn MessagingClient> = Arc::new(LineClient::new(&config.line, timeout)?);
    let recipes =
        Arc::new(IcookClient::new(config.recipes.clone(), timeout)?.with_database(database.clone()));

    let mut bot = BotService::new(
        database.clone(),
        inventory.clone(),
        Arc::clone(&messaging),
        recipes,
        &config.reminder,
    );

    if let Some(api_key) = config.gemini.api_key.as_deref() {
        let mut provider = GeminiProvider::new(api_key).with_timeout(timeout)?;
        if let Some(model) = config.gemini.model.as_deref() {
            provider = provider.with_default_model(model);
        }
        info!(model = provider.default_model(), "Gemini enabled");
        bot = bot.with_llm(Arc::new(provider));
    } else {
        warn!("GEMINI_API_KEY not set, AI features disabled");
    }

    let scheduler = if config.reminder.enabled {
        let job = ReminderJob::new(
            database.clone(),
            inventory,
            config.reminder.horizon(),
            config.reminder.display_offset(),
        );
        Some(ReminderScheduler::spawn(
            job,
            Arc::clone(&messaging),
            Duration::from_secs(config.reminder.interval_secs),
        ))
    } else {
        info!("Reminder scheduler disabled");
        None
    };

    let resources = Arc::new(ServerResources::new(Arc::new(config), database, bot));
    let served = server::serve(resources).await;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }

    served?;
    info!("Fridge companion server stopped");
    Ok(())
}
