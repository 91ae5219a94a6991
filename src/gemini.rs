//! Gemini `generateContent` client used for chat, summaries and sentiment scoring.

mod client;
mod sentiment;
mod structured;
mod wire;

pub use client::{CHAT_FALLBACK, GeminiClient, LanguageModel, SUMMARY_FALLBACK};
pub use sentiment::SentimentResult;
pub use structured::StructuredOutput;
