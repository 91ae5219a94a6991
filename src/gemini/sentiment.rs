use serde::Deserialize;
use serde_json::json;

use super::structured::StructuredOutput;

const SENTIMENT_INSTRUCTION: &str = "You are a sentiment analysis expert. \
Analyze the sentiment of the text and give a rating from 1 to 5 stars \
and a confidence score between 0 and 1. \
Reply with JSON in this format: {\"rating\": number, \"confidence\": number}";

/// Star rating and confidence returned by sentiment scoring.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SentimentResult {
    /// Intended range 1 to 5.
    pub rating: i64,
    /// Intended range 0.0 to 1.0.
    pub confidence: f64,
}

impl StructuredOutput for SentimentResult {
    fn system_instruction() -> &'static str {
        SENTIMENT_INSTRUCTION
    }

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "rating": {"type": "INTEGER"},
                "confidence": {"type": "NUMBER"}
            },
            "required": ["rating", "confidence"]
        })
    }
}
