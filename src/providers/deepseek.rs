use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::providers::{chat_content, send_json, trim_base, LlmProvider, Prompt, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
const MODEL: &str = "deepseek-chat";

pub struct DeepSeekProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DeepSeekProvider {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        DeepSeekProvider {
            client,
            api_key: api_key.into(),
            base_url: trim_base(base_url.unwrap_or(DEFAULT_BASE_URL)).to_string(),
        }
    }

    pub fn from_config(config: &AppConfig, client: Client) -> Option<Self> {
        config
            .deepseek_key()
            .map(|key| Self::new(client, key, config.deepseek_base()))
    }
}

#[async_trait]
impl LlmProvider for DeepSeekProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        let request = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": MODEL,
                "messages": [
                    {"role": "system", "content": prompt.system},
                    {"role": "user", "content": prompt.user}
                ],
                "response_format": {"type": "json_object"}
            }));

        let body = send_json(self.kind(), request).await?;
        chat_content(self.kind(), &body)
    }
}
