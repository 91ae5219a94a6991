//! Prefix commands: `help`, `info` and `ping`.

use std::time::Duration;

use poise::CreateReply;
use poise::serenity_prelude::{Colour, CreateEmbed, UserId};

use crate::bot::Data;
use crate::error::{BotError, Result};

/// Context type for bot commands.
type Context<'a> = poise::Context<'a, Data, BotError>;

/// Embed listing the available commands.
#[must_use]
pub fn help_embed(prefix: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("🤖 Bot help")
        .description("Here are the available commands:")
        .colour(Colour::BLUE)
        .field(format!("{prefix}help"), "Show this help message", false)
        .field(format!("{prefix}info"), "Information about the bot", false)
        .field(format!("{prefix}ping"), "Check the bot's latency", false)
        .field(
            "💬 Automatic answers",
            "Ask me anything and I'll answer with Gemini AI!",
            false,
        )
}

/// Embed describing the bot account and its reach.
#[must_use]
pub fn info_embed(name: &str, id: UserId, guild_count: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title("ℹ️ Bot information")
        .description("Discord bot written in Rust")
        .colour(Colour::DARK_GREEN)
        .field("Name", name, true)
        .field("ID", id.to_string(), true)
        .field("Servers", guild_count.to_string(), true)
}

/// Latency line for `ping`, rounded to whole milliseconds.
#[must_use]
pub fn format_latency(latency: Duration) -> String {
    let millis = (latency.as_secs_f64() * 1000.0).round();
    format!("🏓 Pong! Latency: {millis}ms")
}

/// Show the available commands.
#[poise::command(prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<()> {
    let embed = help_embed(ctx.prefix());
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Information about the bot.
#[poise::command(prefix_command)]
pub async fn info(ctx: Context<'_>) -> Result<()> {
    let (name, id) = {
        let user = ctx.cache().current_user();
        (user.name.clone(), user.id)
    };
    let guild_count = ctx.cache().guild_count();

    ctx.send(CreateReply::default().embed(info_embed(&name, id, guild_count)))
        .await?;
    Ok(())
}

/// Check the gateway latency.
#[poise::command(prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<()> {
    let latency = ctx.ping().await;
    ctx.say(format_latency(latency)).await?;
    Ok(())
}

/// Get all bot commands.
#[must_use]
pub fn bot_commands() -> Vec<poise::Command<Data, BotError>> {
    vec![help(), info(), ping()]
}
