// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic): filtering, formatting, dispatch
// - `infra/` = Implementations of core traits (Codeforces/Kaggle HTTP clients, env config)
// - `discord/` = Discord-specific adapters (slash commands, responder, error hook)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands, run the gateway and shut it down on Ctrl-C

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing_subscriber::EnvFilter;

use crate::core::codeforces::CodeforcesService;
use crate::core::kaggle::KaggleService;
use crate::discord::commands::presence;
use crate::discord::Data;
use crate::infra::codeforces::CodeforcesApiClient;
use crate::infra::config::BotConfig;
use crate::infra::kaggle::KaggleApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().context("Failed to load bot configuration")?;
    tracing::info!(?config, "Configuration loaded");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let codeforces_client =
        CodeforcesApiClient::new(&config.codeforces_api_url, config.http_timeout)
            .context("Failed to create Codeforces API client")?;
    let codeforces_service = Arc::new(CodeforcesService::new(codeforces_client));

    let kaggle_client = KaggleApiClient::new(
        &config.kaggle_api_url,
        config.kaggle_username.clone(),
        config.kaggle_key.clone(),
        config.http_timeout,
    )
    .context("Failed to create Kaggle API client")?;
    let kaggle_service = Arc::new(KaggleService::new(kaggle_client));

    let token = config.discord_token.clone();
    let data = Data {
        config: Arc::new(config),
        codeforces: codeforces_service,
        kaggle: kaggle_service,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Slash commands only; no message content needed.
    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            on_error: |error| Box::pin(discord::error_handler::on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "Bot is starting up...");

                // Register slash commands globally (can take up to an hour to propagate)
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!(
                    count = framework.options().commands.len(),
                    "Commands registered"
                );

                presence::on_ready(ctx);
                tracing::info!("Bot is ready!");

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    // Release the gateway connection on Ctrl-C.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown requested, closing gateway connection");
                shard_manager.shutdown_all().await;
            }
            Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    client.start().await.context("Error running bot")?;
    tracing::info!("Bot stopped");
    Ok(())
}
