use crate::config::AppConfig;
use crate::model::RegistrySnapshot;
use crate::providers::ProviderKind;
use std::sync::Arc;

/// Reports which providers the deployment has credentials for.
///
/// Availability is recomputed from configuration on every call and never
/// cached, so the answer always reflects the configuration it was built with.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    config: Arc<AppConfig>,
}

impl ProviderRegistry {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        let config = &self.config;
        match kind {
            ProviderKind::Glm => config.glm_key().is_some(),
            ProviderKind::DeepSeek => config.deepseek_key().is_some(),
            ProviderKind::Gemini => config.gemini_key().is_some(),
            ProviderKind::OpenAi => config.openai_key().is_some(),
        }
    }

    /// Configured providers in priority order.
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::PRIORITY
            .into_iter()
            .filter(|kind| self.is_configured(*kind))
            .collect()
    }

    /// The highest-priority configured provider.
    pub fn default_provider(&self) -> Option<ProviderKind> {
        self.configured().into_iter().next()
    }

    /// The highest-priority configured provider other than `excluded`.
    pub fn alternative_to(&self, excluded: ProviderKind) -> Option<ProviderKind> {
        self.configured().into_iter().find(|kind| *kind != excluded)
    }

    pub fn list_configured(&self) -> RegistrySnapshot {
        let configured = self.configured();
        RegistrySnapshot {
            providers: configured.iter().map(|kind| kind.descriptor()).collect(),
            default: configured.first().map(|kind| kind.id().to_string()),
        }
    }
}
