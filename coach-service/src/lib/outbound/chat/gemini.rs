use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::ChatConfig;
use crate::domain::chat::errors::ChatError;
use crate::domain::chat::ports::ChatModel;

/// Chat adapter for a hosted Gemini-style `generateContent` endpoint.
///
/// Sends the coaching system prompt with every request and flattens the
/// first candidate's parts into a single reply string. Deterministic
/// generation settings (temperature 0) so the coach gives stable advice.
pub struct GeminiChatClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    system_prompt: String,
}

impl GeminiChatClient {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            system_prompt: config.system_prompt.clone(),
        }
    }
}

#[async_trait]
impl ChatModel for GeminiChatClient {
    async fn send(&self, prompt: &str) -> Result<String, ChatError> {
        let body = json!({
            "system_instruction": {
                "parts": [{ "text": self.system_prompt }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": 8192,
                "temperature": 0,
                "topP": 0.95
            }
        });

        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::RequestFailed(format!(
                "Model endpoint returned {}",
                status
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let reply = payload
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        if reply.trim().is_empty() {
            return Err(ChatError::NoResponse);
        }

        Ok(reply)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}
