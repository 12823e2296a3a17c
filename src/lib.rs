//! Bilingual language-game manuals for single words.
//!
//! A word goes in, one of several LLM backends (GLM, DeepSeek, Gemini,
//! OpenAI) is asked for a fixed English/Chinese JSON document, and the
//! reply comes back as a typed [`GameManual`] tagged with the provider that
//! wrote it. Which backends are offered depends only on which credentials
//! the deployment has configured.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod protocol;
pub mod providers;
pub mod server;

pub use crate::config::AppConfig;
pub use dispatcher::Dispatcher;
pub use error::GenerateError;
pub use model::{
    BilingualString, GameManual, GenerationResult, ProviderDescriptor, RegistrySnapshot,
};
pub use protocol::{ErrorBody, Suggestion};
pub use providers::{ProviderKind, ProviderRegistry};

use std::sync::Arc;

/// Generate a manual using configuration from the environment.
///
/// # Arguments
/// * `word` - The word to describe
/// * `provider` - Optional provider id or alias (e.g. "zhipu", "gpt-4o")
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), langgame::GenerateError> {
/// let result = langgame::generate_manual("ephemeral", Some("deepseek")).await?;
/// println!("{} ({})", result.manual.target_word.zh, result.provider);
/// # Ok(())
/// # }
/// ```
pub async fn generate_manual(
    word: &str,
    provider: Option<&str>,
) -> Result<GenerationResult, GenerateError> {
    let config = AppConfig::load()?;
    Dispatcher::new(Arc::new(config))?
        .dispatch(word, provider)
        .await
}

/// List the providers configured in the environment.
pub fn list_providers() -> Result<RegistrySnapshot, GenerateError> {
    let config = AppConfig::load()?;
    Ok(ProviderRegistry::new(Arc::new(config)).list_configured())
}
