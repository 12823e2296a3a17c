//! Error bodies returned to the UI.
//!
//! Every failure is reported as `{ "error": { "message" } }`. Requests for an
//! unconfigured provider also list the configured ids under `available`, and
//! failures tied to one provider carry a [`Suggestion`] to switch to another
//! configured provider, which the UI can offer as a one-click retry.

use crate::error::GenerateError;
use crate::providers::{ProviderKind, ProviderRegistry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAction {
    SwitchProvider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionReason {
    /// The failing provider has no credentials on this deployment
    ProviderUnavailable,
    /// The failing provider was called and returned an error
    ProviderError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: SuggestionAction,
    /// Id of the provider to retry with
    pub recommended: String,
    pub message: String,
    pub reason: SuggestionReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl ErrorBody {
    pub fn from_message(message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorMessage {
                message: message.into(),
            },
            available: None,
            suggestion: None,
        }
    }

    /// Build the body for `err`, consulting `registry` for a replacement provider.
    pub fn from_error(err: &GenerateError, registry: &ProviderRegistry) -> Self {
        let available: Option<Vec<String>> = match err {
            GenerateError::ProviderUnavailable { available, .. } => Some(
                available
                    .iter()
                    .map(|kind| kind.id().to_string())
                    .collect(),
            ),
            _ => None,
        };

        ErrorBody {
            error: ErrorMessage {
                message: err.to_string(),
            },
            available,
            suggestion: suggest(err, registry),
        }
    }
}

/// A switch suggestion, when the error names a provider and another one is configured.
pub fn suggest(err: &GenerateError, registry: &ProviderRegistry) -> Option<Suggestion> {
    let failing = err.failing_provider()?;
    let recommended = registry.alternative_to(failing)?;
    let reason = match err {
        GenerateError::ProviderUnavailable { .. } => SuggestionReason::ProviderUnavailable,
        _ => SuggestionReason::ProviderError,
    };
    Some(switch_to(recommended, reason))
}

fn switch_to(kind: ProviderKind, reason: SuggestionReason) -> Suggestion {
    Suggestion {
        action: SuggestionAction::SwitchProvider,
        recommended: kind.id().to_string(),
        message: format!("Switch to {} and try again.", kind.display_name()),
        reason,
    }
}
