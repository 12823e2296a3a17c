use crate::config::AppConfig;
use crate::providers::{
    DeepSeekProvider, GeminiProvider, GlmProvider, LlmProvider, OpenAIProvider, ProviderKind,
};
use reqwest::Client;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the adapter for `kind`, or `None` when its credentials are missing.
    pub fn create(
        kind: ProviderKind,
        config: &AppConfig,
        client: Client,
    ) -> Option<Box<dyn LlmProvider>> {
        match kind {
            ProviderKind::Glm => GlmProvider::from_config(config, client)
                .map(|p| Box::new(p) as Box<dyn LlmProvider>),
            ProviderKind::DeepSeek => DeepSeekProvider::from_config(config, client)
                .map(|p| Box::new(p) as Box<dyn LlmProvider>),
            ProviderKind::Gemini => GeminiProvider::from_config(config, client)
                .map(|p| Box::new(p) as Box<dyn LlmProvider>),
            ProviderKind::OpenAi => OpenAIProvider::from_config(config, client)
                .map(|p| Box::new(p) as Box<dyn LlmProvider>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_configured() -> AppConfig {
        AppConfig {
            glm_api_key: Some("glm".to_string()),
            deepseek_api_key: Some("ds".to_string()),
            gemini_api_key: Some("gm".to_string()),
            openai_api_key: Some("oa".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_each_provider() {
        let config = all_configured();
        for kind in ProviderKind::PRIORITY {
            let provider = ProviderFactory::create(kind, &config, Client::new()).unwrap();
            assert_eq!(provider.kind(), kind);
            assert_eq!(provider.provider_name(), kind.display_name());
        }
    }

    #[test]
    fn test_create_unconfigured_provider() {
        let config = AppConfig {
            deepseek_api_key: Some("ds".to_string()),
            ..Default::default()
        };
        assert!(ProviderFactory::create(ProviderKind::Gemini, &config, Client::new()).is_none());
        assert!(ProviderFactory::create(ProviderKind::DeepSeek, &config, Client::new()).is_some());
    }
}
