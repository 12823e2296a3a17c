use thiserror::Error;

use crate::providers::ProviderKind;

/// Errors that can occur while generating a manual
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The word was missing, not a string, or blank
    #[error("Word is required and must be a non-empty string.")]
    InvalidInput,

    /// The caller asked for a provider whose credentials are not configured
    #[error("Requested provider {} is not available on server.", .requested.display_name())]
    ProviderUnavailable {
        requested: ProviderKind,
        available: Vec<ProviderKind>,
    },

    /// No provider credentials are configured at all
    #[error(
        "No AI provider API key configured. Please set {} in your environment variables.",
        ProviderKind::credential_hint()
    )]
    NoProviderConfigured,

    /// The backend answered with a non-2xx status, or could not be reached
    #[error("{message}")]
    Upstream {
        provider: ProviderKind,
        status: Option<u16>,
        message: String,
    },

    /// The backend replied, but no manual could be recovered from the payload
    #[error("{} returned an unusable response: {detail}", .provider.display_name())]
    MalformedResponse {
        provider: ProviderKind,
        detail: String,
    },

    /// The shared HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GenerateError {
    /// HTTP status the error is reported with at the service boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            GenerateError::InvalidInput | GenerateError::ProviderUnavailable { .. } => 400,
            _ => 500,
        }
    }

    /// The provider that was unavailable or failed, if the error is tied to one.
    pub fn failing_provider(&self) -> Option<ProviderKind> {
        match self {
            GenerateError::ProviderUnavailable { requested, .. } => Some(*requested),
            GenerateError::Upstream { provider, .. }
            | GenerateError::MalformedResponse { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}
