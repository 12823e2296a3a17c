use crate::config::AppConfig;
use crate::error::GenerateError;
use crate::model::GenerationResult;
use crate::providers::{ProviderFactory, ProviderKind, ProviderRegistry};
use log::{debug, info, warn};
use reqwest::Client;
use std::sync::Arc;

/// Picks one provider per request and runs it exactly once.
///
/// A failing provider is reported to the caller, never retried against a
/// different backend.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<AppConfig>,
    registry: ProviderRegistry,
    client: Client,
}

impl Dispatcher {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(config.generation.timeout())
            .build()?;
        Ok(Dispatcher {
            registry: ProviderRegistry::new(config.clone()),
            config,
            client,
        })
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Decide which provider serves the request.
    ///
    /// A recognized alias is honored or rejected, never substituted. An
    /// unrecognized or blank name falls back to the default priority.
    pub fn resolve(&self, requested: Option<&str>) -> Result<ProviderKind, GenerateError> {
        let requested = requested.map(str::trim).filter(|name| !name.is_empty());

        if let Some(name) = requested {
            match ProviderKind::from_alias(name) {
                Some(kind) if self.registry.is_configured(kind) => return Ok(kind),
                Some(kind) => {
                    return Err(GenerateError::ProviderUnavailable {
                        requested: kind,
                        available: self.registry.configured(),
                    })
                }
                None => debug!("unknown provider '{}', using default priority", name),
            }
        }

        self.registry
            .default_provider()
            .ok_or(GenerateError::NoProviderConfigured)
    }

    /// Generate a manual for `word` with the requested or default provider.
    pub async fn dispatch(
        &self,
        word: &str,
        requested: Option<&str>,
    ) -> Result<GenerationResult, GenerateError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(GenerateError::InvalidInput);
        }

        let kind = self.resolve(requested)?;
        let provider = ProviderFactory::create(kind, &self.config, self.client.clone())
            .ok_or(GenerateError::NoProviderConfigured)?;
        info!("generating manual for '{}' with {}", word, provider.provider_name());

        let manual = provider.generate(word).await.inspect_err(|e| {
            warn!("{} failed: {}", provider.provider_name(), e);
        })?;

        if self.config.generation.strict {
            if let Some(path) = manual.first_blank_leaf() {
                warn!("{} returned a blank field at {}", provider.provider_name(), path);
                return Err(GenerateError::MalformedResponse {
                    provider: kind,
                    detail: format!("field {} is empty", path),
                });
            }
        }

        Ok(GenerationResult {
            manual,
            provider: provider.provider_name().to_string(),
        })
    }
}
