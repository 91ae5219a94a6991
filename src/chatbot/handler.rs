//! Main handler for inbound channel messages.

use async_trait::async_trait;
use log::{debug, info};
use poise::serenity_prelude::{Context, Message as SerenityMessage, UserId};

use crate::bot::Data;
use crate::error::Result;
use crate::gemini::LanguageModel;

use super::relay::{ChatSettings, ReplySink, relay_chat};
use super::routing::{Route, route_message};

/// Delivers replies for one Discord message.
struct DiscordReply<'a> {
    ctx: &'a Context,
    message: &'a SerenityMessage,
}

#[async_trait]
impl ReplySink for DiscordReply<'_> {
    async fn reply(&self, text: &str) -> Result<()> {
        self.message.reply_ping(&self.ctx.http, text).await?;
        Ok(())
    }

    async fn send(&self, text: &str) -> Result<()> {
        self.message.channel_id.say(&self.ctx.http, text).await?;
        Ok(())
    }

    async fn start_typing(&self) {
        if let Err(e) = self.message.channel_id.broadcast_typing(&self.ctx.http).await {
            debug!("Failed to broadcast typing indicator: {e}");
        }
    }
}

/// Handle a newly created Discord message.
pub async fn handle_message(
    ctx: &Context,
    new_message: &SerenityMessage,
    data: &Data,
) -> Result<()> {
    let bot_user_id = ctx.cache.current_user().id;
    let sink = DiscordReply {
        ctx,
        message: new_message,
    };

    let route = process_message(
        data.llm.as_ref(),
        &sink,
        bot_user_id,
        new_message.author.id,
        &new_message.content,
        &data.chat,
    )
    .await?;

    if route == Route::Chat {
        info!(
            "Answered message from {} in channel {}",
            new_message.author.tag(),
            new_message.channel_id
        );
    }
    Ok(())
}

/// Route a message and, for chat messages, relay the model's answer.
async fn process_message<S>(
    llm: &dyn LanguageModel,
    sink: &S,
    bot_user_id: UserId,
    author_id: UserId,
    content: &str,
    settings: &ChatSettings,
) -> Result<Route>
where
    S: ReplySink + ?Sized,
{
    let route = route_message(author_id, bot_user_id, content, &settings.command_prefix);
    match route {
        Route::Ignore => {}
        Route::Command => debug!("Leaving prefixed message to the command framework"),
        Route::Chat => {
            info!("Received chat message from {author_id}: {content}");
            relay_chat(llm, sink, content, settings).await?;
        }
    }
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::relay::tests::{RecordingSink, Script, ScriptedModel, Sent, settings};

    const BOT: UserId = UserId::new(10);
    const USER: UserId = UserId::new(20);

    #[tokio::test]
    async fn own_message_sends_nothing() -> Result<()> {
        let model = ScriptedModel::new(Script::Answer("echo".to_string()));
        let sink = RecordingSink::default();

        let route = process_message(&model, &sink, BOT, BOT, "hello", &settings(1950)).await?;

        assert_eq!(route, Route::Ignore);
        assert!(sink.sent().is_empty());
        assert_eq!(model.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn command_never_reaches_model() -> Result<()> {
        let model = ScriptedModel::new(Script::Answer("nope".to_string()));
        let sink = RecordingSink::default();

        let route = process_message(&model, &sink, BOT, USER, "!ping", &settings(1950)).await?;

        assert_eq!(route, Route::Command);
        assert_eq!(model.calls(), 0);
        assert!(sink.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn chat_message_is_answered() -> Result<()> {
        let model = ScriptedModel::new(Script::Answer("Hi!".to_string()));
        let sink = RecordingSink::default();

        let route = process_message(&model, &sink, BOT, USER, "hello", &settings(1950)).await?;

        assert_eq!(route, Route::Chat);
        assert_eq!(model.calls(), 1);
        assert_eq!(sink.sent(), vec![Sent::Reply("Hi!".to_string())]);
        Ok(())
    }
}
