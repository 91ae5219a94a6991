//! Discord bot core logic and event handling.

use std::sync::Arc;

use log::{debug, error, info};
use poise::{
    Framework, FrameworkError, FrameworkOptions, PrefixFrameworkOptions, builtins,
    serenity_prelude::{
        ClientBuilder, Context, Error as SerenityError, FullEvent, GatewayError, GatewayIntents,
    },
};

use crate::chatbot::{ChatSettings, handle_message};
use crate::commands::bot_commands;
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::gemini::{GeminiClient, LanguageModel};
use crate::liveness;

/// Shared state handed to every command and event.
pub struct Data {
    pub llm: Arc<dyn LanguageModel>,
    pub chat: ChatSettings,
}

/// Run the Discord bot.
///
/// Returns `Ok(())` without connecting when no Discord token is configured.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    let Some(discord_token) = config.discord_token.clone() else {
        error!(
            "DISCORD_BOT_TOKEN is not set. Configure your Discord token in the environment or a .env file."
        );
        return Ok(());
    };

    debug!("Initializing Gemini client");
    let llm: Arc<dyn LanguageModel> = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));

    let chat = ChatSettings {
        command_prefix: config.command_prefix.clone(),
        max_chunk_length: config.max_chunk_length,
        response_timeout: config.response_timeout,
    };

    liveness::spawn(config.liveness_addr);

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: bot_commands(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("{} connected to Discord (ID {})", ready.user.name, ready.user.id);
                Ok(Data { llm, chat })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            if let Err(SerenityError::Gateway(GatewayError::InvalidAuthentication)) = &result {
                error!("Invalid Discord token. Check DISCORD_BOT_TOKEN.");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> Result<()> {
    if let FullEvent::Message { new_message } = event {
        handle_message(ctx, new_message, data).await?;
    }
    Ok(())
}

async fn on_error(error: FrameworkError<'_, Data, BotError>) {
    match error {
        FrameworkError::EventHandler { error, event, .. } => {
            error!("Error handling {} event: {error}", event.snake_case_name());
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {error}", ctx.command().name);
        }
        other => {
            if let Err(e) = builtins::on_error(other).await {
                error!("Error while handling framework error: {e}");
            }
        }
    }
}
