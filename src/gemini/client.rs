use async_trait::async_trait;
use log::{debug, error, info};

use crate::error::{BotError, Result};

use super::sentiment::SentimentResult;
use super::structured::{StructuredOutput, parse_structured, structured_request};
use super::wire::{GenerateContentRequest, GenerateContentResponse};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Sent when the model answers a chat message with nothing.
pub const CHAT_FALLBACK: &str = "Sorry, I couldn't generate a response.";

/// Returned when the model answers a summary request with nothing.
pub const SUMMARY_FALLBACK: &str = "ERROR: Unable to summarize";

const SUMMARY_PROMPT: &str =
    "Summarize the following text concisely while keeping the key points:";

/// Chat capability consumed by the message handler.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Answer a free-form user message.
    async fn chat(&self, message: &str) -> Result<String>;
}

pub struct GeminiClient {
    api_key: Option<String>,
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::with_base_url(api_key, model, GEMINI_API_BASE)
    }

    /// Client talking to a different `models` endpoint root.
    #[must_use]
    pub fn with_base_url(api_key: Option<String>, model: String, base_url: &str) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Summarize `text`, falling back to [`SUMMARY_FALLBACK`] on an empty answer.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = format!("{SUMMARY_PROMPT}\n\n{text}");
        let summary = self
            .generate(&GenerateContentRequest::text(prompt))
            .await
            .inspect_err(|e| error!("Gemini summarize call failed: {e}"))?;

        Ok(summary.unwrap_or_else(|| SUMMARY_FALLBACK.to_string()))
    }

    /// Score the sentiment of `text`.
    ///
    /// Every failure, including an empty or malformed answer, is wrapped in
    /// [`BotError::Sentiment`].
    pub async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResult> {
        self.generate_structured(text)
            .await
            .map_err(|e| BotError::Sentiment(Box::new(e)))
    }

    /// Ask the model for a `T`, constrained by `T`'s response schema.
    pub async fn generate_structured<T: StructuredOutput>(&self, text: &str) -> Result<T> {
        let raw = self.generate(&structured_request::<T>(text)).await?;
        parse_structured(raw.as_deref())
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| BotError::Config("GEMINI_API_KEY is not set".to_string()))
    }

    /// Single `generateContent` round trip. `Ok(None)` means the model returned no text.
    async fn generate(&self, request: &GenerateContentRequest) -> Result<Option<String>> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::GeminiApi { status, message });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.text();
        debug!(
            "Received response from Gemini API ({} characters)",
            text.as_ref().map_or(0, String::len)
        );
        Ok(text)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn chat(&self, message: &str) -> Result<String> {
        match self.generate(&GenerateContentRequest::text(message)).await {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => {
                info!("Gemini returned an empty chat response, using fallback");
                Ok(CHAT_FALLBACK.to_string())
            }
            Err(e) => {
                error!("Gemini chat call failed: {e}");
                Err(e)
            }
        }
    }
}
