//! Forwards a chat message to the model and delivers the answer in chunks.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};

use crate::chunker::split_message;
use crate::error::{BotError, Result};
use crate::gemini::LanguageModel;

/// Knobs for the chat path, taken from configuration.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub command_prefix: String,
    pub max_chunk_length: usize,
    pub response_timeout: Duration,
}

/// Where replies to one inbound message go.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Reply to the original message, mentioning its author.
    async fn reply(&self, text: &str) -> Result<()>;

    /// Plain message in the same channel.
    async fn send(&self, text: &str) -> Result<()>;

    /// Show the typing indicator. Failures are not worth reporting.
    async fn start_typing(&self) {}
}

/// Ask the model about `content` and deliver the answer through `sink`.
///
/// Model failures, including the timeout, are logged and answered with an
/// error reply. Only delivery failures are returned.
pub async fn relay_chat<S>(
    llm: &dyn LanguageModel,
    sink: &S,
    content: &str,
    settings: &ChatSettings,
) -> Result<()>
where
    S: ReplySink + ?Sized,
{
    sink.start_typing().await;

    let answer = match tokio::time::timeout(settings.response_timeout, llm.chat(content)).await {
        Ok(result) => result,
        Err(_) => Err(BotError::Timeout(settings.response_timeout)),
    };

    let answer = match answer {
        Ok(answer) => answer,
        Err(e) => {
            error!("Error answering chat message: {e}");
            return sink.reply(&e.chat_reply()).await;
        }
    };

    let chunks = split_message(&answer, settings.max_chunk_length);
    debug!("Delivering answer in {} chunk(s)", chunks.len());

    let mut chunks = chunks.iter();
    if let Some(first) = chunks.next() {
        sink.reply(first).await?;
    }
    for chunk in chunks {
        sink.send(chunk).await?;
    }

    info!("Delivered answer of {} characters", answer.chars().count());
    Ok(())
}
