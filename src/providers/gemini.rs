use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::providers::{
    manual_response_schema, send_json, trim_base, unexpected_format, LlmProvider, Prompt,
    ProviderKind,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.0-flash-exp";

/// Google Gemini through the generateContent endpoint.
///
/// Gemini takes a single user turn, so the system and user instructions are
/// combined. Generation is constrained with a response schema, which makes
/// malformed replies rarer but does not rule them out.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        GeminiProvider {
            client,
            api_key: api_key.into(),
            base_url: trim_base(base_url.unwrap_or(DEFAULT_BASE_URL)).to_string(),
        }
    }

    pub fn from_config(config: &AppConfig, client: Client) -> Option<Self> {
        config
            .gemini_key()
            .map(|key| Self::new(client, key, config.gemini_base()))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, MODEL);

        let request = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt.combined() }]
                }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": manual_response_schema()
                }
            }));

        let body = send_json(self.kind(), request).await?;
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| unexpected_format(self.kind()))
    }
}
