//! Decides what to do with an inbound message.

use poise::serenity_prelude::UserId;

/// Outcome of inspecting an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sent by the bot itself, or nothing to answer.
    Ignore,
    /// Starts with the command prefix; the prefix framework owns it.
    Command,
    /// Free-form text for the language model.
    Chat,
}

/// Route a message by author and content.
#[must_use]
pub fn route_message(author_id: UserId, bot_id: UserId, content: &str, prefix: &str) -> Route {
    if author_id == bot_id {
        return Route::Ignore;
    }
    if !prefix.is_empty() && content.starts_with(prefix) {
        return Route::Command;
    }
    if content.trim().is_empty() {
        return Route::Ignore;
    }
    Route::Chat
}
