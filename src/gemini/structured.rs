//! Schema-constrained generation.
//!
//! A type implementing [`StructuredOutput`] carries both the instruction and
//! the response schema sent to the model, and is the type the response body
//! is decoded into. Responses that do not fit the type are rejected here, at
//! the client boundary.

use log::debug;
use serde::de::DeserializeOwned;

use crate::error::{BotError, Result};

use super::wire::{Content, GenerateContentRequest, GenerationConfig};

const JSON_MIME_TYPE: &str = "application/json";

/// A response shape the model is asked to produce as JSON.
pub trait StructuredOutput: DeserializeOwned {
    /// Instruction given to the model alongside the user text.
    fn system_instruction() -> &'static str;

    /// Schema in the Gemini `responseSchema` dialect.
    fn response_schema() -> serde_json::Value;
}

pub(super) fn structured_request<T: StructuredOutput>(text: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(text)],
        system_instruction: Some(Content::instruction(T::system_instruction())),
        generation_config: Some(GenerationConfig {
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: T::response_schema(),
        }),
    }
}

/// Decode a raw model response into `T`.
///
/// Fails on a missing body, invalid JSON, and missing or mistyped fields.
pub(super) fn parse_structured<T: StructuredOutput>(raw: Option<&str>) -> Result<T> {
    let raw = raw.ok_or(BotError::EmptyResponse)?;
    debug!("Raw structured response: {raw}");
    Ok(serde_json::from_str(raw)?)
}
