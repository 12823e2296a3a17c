use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::providers::{chat_content, send_json, trim_base, LlmProvider, Prompt, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MODEL: &str = "gpt-4o";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        OpenAIProvider {
            client,
            api_key: api_key.into(),
            base_url: trim_base(base_url.unwrap_or(DEFAULT_BASE_URL)).to_string(),
        }
    }

    /// Create an OpenAI provider from configuration; `None` when no key is set.
    pub fn from_config(config: &AppConfig, client: Client) -> Option<Self> {
        config
            .openai_key()
            .map(|key| Self::new(client, key, config.openai_base()))
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{sample_manual, sample_manual_json};
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o",
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [{
                        "message": {
                            "content": format!("Here is the manual:\n{}\n", sample_manual_json())
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let url = server.url();
        let provider = OpenAIProvider::new(Client::new(), "fake_api_key", Some(url.as_str()));
        let manual = provider.generate("serendipity").await.unwrap();

        assert_eq!(manual, sample_manual());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#)
            .create_async()
            .await;

        let url = server.url();
        let provider = OpenAIProvider::new(Client::new(), "fake_api_key", Some(url.as_str()));
        let err = provider.generate("serendipity").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "OpenAI API Error: 429 Too Many Requests - Rate limit reached"
        );
        assert!(matches!(err, GenerateError::Upstream { status: Some(429), .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_without_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let url = server.url();
        let provider = OpenAIProvider::new(Client::new(), "fake_api_key", Some(url.as_str()));
        let err = provider.generate("serendipity").await.unwrap_err();
        assert!(err.to_string().ends_with("- Unknown API error"));
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::new(Client::new(), "fake_api_key", None);
        assert_eq!(provider.provider_name(), "OpenAI");
        assert_eq!(provider.base_url, "https://api.openai.com");
    }
}
