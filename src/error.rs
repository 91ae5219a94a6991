use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gemini API error ({status}): {message}")]
    GeminiApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Gemini response error: {0}")]
    GeminiResponse(String),

    #[error("Empty response from the model")]
    EmptyResponse,

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sentiment analysis failed: {0}")]
    Sentiment(#[source] Box<BotError>),

    #[error("The model did not answer within {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

impl BotError {
    /// Returns a user-friendly error message suitable for displaying in Discord
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BotError::Serenity(_) => {
                "Sorry, I'm having trouble communicating with Discord right now. Please try again later.".to_string()
            }
            BotError::Config(_) => {
                "Sorry, there's a configuration issue on my end. Please contact the bot administrator.".to_string()
            }
            BotError::GeminiApi { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    "Sorry, I'm having authentication issues with my AI service. Please contact the bot administrator.".to_string()
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    "Sorry, I've hit my rate limit. Please try again in a few moments.".to_string()
                }
                status if status.is_server_error() => {
                    "Sorry, the AI service is experiencing issues right now. Please try again later.".to_string()
                }
                status if status.is_client_error() => {
                    "Sorry, there was an issue with my request to the AI service. Please try again or contact the bot administrator.".to_string()
                }
                _ => {
                    "Sorry, I'm having trouble connecting to my AI service. Please try again later.".to_string()
                }
            },
            BotError::GeminiResponse(_) | BotError::EmptyResponse | BotError::Json(_) => {
                "Sorry, I received an unexpected response from my AI service. Please try again.".to_string()
            }
            BotError::Reqwest(_) => {
                "Sorry, I'm having network issues. Please try again in a moment.".to_string()
            }
            BotError::Sentiment(source) => source.user_message(),
            BotError::Timeout(_) => {
                "Sorry, my AI service took too long to answer. Please try again.".to_string()
            }
            BotError::Io(_) => {
                "Sorry, something went wrong on my end. Please try again later.".to_string()
            }
        }
    }

    /// Reply text sent back to a user whose chat message failed.
    #[must_use]
    pub fn chat_reply(&self) -> String {
        format!("{}\n-# {self}", self.user_message())
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_wrapper_keeps_cause_in_message() {
        let err = BotError::Sentiment(Box::new(BotError::EmptyResponse));
        assert_eq!(
            err.to_string(),
            "Sentiment analysis failed: Empty response from the model"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rate_limit_has_dedicated_user_message() {
        let err = BotError::GeminiApi {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "quota".to_string(),
        };
        assert!(err.user_message().contains("rate limit"));
    }

    #[test]
    fn chat_reply_includes_description() {
        let err = BotError::Config("GEMINI_API_KEY is not set".to_string());
        let reply = err.chat_reply();
        assert!(reply.starts_with("Sorry, there's a configuration issue"));
        assert!(reply.contains("GEMINI_API_KEY is not set"));
    }

    #[test]
    fn timeout_reports_seconds() {
        let err = BotError::Timeout(Duration::from_secs(60));
        assert_eq!(err.to_string(), "The model did not answer within 60 seconds");
    }
}
