use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::providers::{chat_content, send_json, trim_base, LlmProvider, Prompt, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
const MODEL: &str = "glm-4.5-air";

/// Zhipu GLM through its OpenAI-compatible chat endpoint.
pub struct GlmProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GlmProvider {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        GlmProvider {
            client,
            api_key: api_key.into(),
            base_url: trim_base(base_url.unwrap_or(DEFAULT_BASE_URL)).to_string(),
        }
    }

    /// Create a GLM provider from configuration; `None` when no key is set.
    pub fn from_config(config: &AppConfig, client: Client) -> Option<Self> {
        config
            .glm_key()
            .map(|key| Self::new(client, key, config.glm_base()))
    }
}

#[async_trait]
impl LlmProvider for GlmProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Glm
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, GenerateError> {
        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": MODEL,
                "temperature": 0.2,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{sample_manual, sample_manual_json};
    use mockito::{Matcher, Server};

    fn chat_reply(content: &str) -> String {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
    }

    #[tokio::test]
    async fn test_generate_strips_fences() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer glm-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "glm-4.5-air",
                "temperature": 0.2,
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_reply(&format!("```json\n{}\n```", sample_manual_json())))
            .create_async()
            .await;

        let url = server.url();
        let provider = GlmProvider::new(Client::new(), "glm-key", Some(url.as_str()));
        let manual = provider.generate("serendipity").await.unwrap();

        assert_eq!(manual, sample_manual());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": "1000", "message": "Invalid API key"}}"#)
            .create_async()
            .await;

        let url = server.url();
        let provider = GlmProvider::new(Client::new(), "bad-key", Some(url.as_str()));
        let err = provider.generate("serendipity").await.unwrap_err();

        match err {
            GenerateError::Upstream {
                provider,
                status,
                message,
            } => {
                assert_eq!(provider, ProviderKind::Glm);
                assert_eq!(status, Some(401));
                assert_eq!(message, "GLM API Error: 401 Unauthorized - Invalid API key");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig {
            zhipu_api_key: Some("zhipu-key".to_string()),
            glm_base_url: Some("https://glm.internal/v4/".to_string()),
            ..Default::default()
        };
        let provider = GlmProvider::from_config(&config, Client::new()).unwrap();
        assert_eq!(provider.api_key, "zhipu-key");
        assert_eq!(provider.base_url, "https://glm.internal/v4");
        assert_eq!(provider.provider_name(), "GLM-4.5-Air");

        assert!(GlmProvider::from_config(&AppConfig::default(), Client::new()).is_none());
    }
}
