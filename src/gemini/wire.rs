//! Request and response bodies of the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(Role::User),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// System instructions carry no role.
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Plain prompt with no instruction or output constraint.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            generation_config: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` when the model produced nothing usable.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_request_has_single_user_content() -> Result<(), serde_json::Error> {
        let body = serde_json::to_value(GenerateContentRequest::text("Hi there"))?;
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Hi there"}]}]})
        );
        Ok(())
    }

    #[test]
    fn structured_request_uses_camel_case() -> Result<(), serde_json::Error> {
        let request = GenerateContentRequest {
            contents: vec![Content::user("text")],
            system_instruction: Some(Content::instruction("rules")),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: json!({"type": "OBJECT"}),
            }),
        };
        let body = serde_json::to_value(request)?;
        assert_eq!(body["systemInstruction"], json!({"parts": [{"text": "rules"}]}));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            json!("application/json")
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"],
            json!({"type": "OBJECT"})
        );
        Ok(())
    }

    #[test]
    fn joins_text_parts_of_first_candidate() -> Result<(), serde_json::Error> {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "world"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }))?;
        assert_eq!(response.text().as_deref(), Some("Hello, world"));
        Ok(())
    }

    #[test]
    fn missing_candidates_mean_no_text() -> Result<(), serde_json::Error> {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}}))?;
        assert!(response.text().is_none());
        Ok(())
    }

    #[test]
    fn blank_text_means_no_text() -> Result<(), serde_json::Error> {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  \n"}]}}]
        }))?;
        assert!(response.text().is_none());
        Ok(())
    }
}
