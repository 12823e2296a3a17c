mod decode;
mod deepseek;
mod factory;
mod gemini;
mod glm;
mod open_ai;
mod prompt;
mod registry;
mod schema;

pub use decode::{decode_manual, DecodeError};
pub use deepseek::DeepSeekProvider;
pub use factory::ProviderFactory;
pub use gemini::GeminiProvider;
pub use glm::GlmProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_prompt, Prompt, SYSTEM_PROMPT};
pub use registry::ProviderRegistry;
pub use schema::manual_response_schema;

use crate::error::GenerateError;
use crate::model::{GameManual, ProviderDescriptor};
use async_trait::async_trait;
use log::debug;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;

/// The closed set of backends the service can talk to.
///
/// Variant order is the default-selection priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Glm,
    DeepSeek,
    Gemini,
    OpenAi,
}

impl ProviderKind {
    /// All providers, highest priority first.
    pub const PRIORITY: [ProviderKind; 4] = [
        ProviderKind::Glm,
        ProviderKind::DeepSeek,
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
    ];

    /// Stable lowercase id used for selection
    pub fn id(self) -> &'static str {
        match self {
            ProviderKind::Glm => "glm",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Human label reported back to callers
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Glm => "GLM-4.5-Air",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    /// Prefix used in upstream error messages
    fn api_label(self) -> &'static str {
        match self {
            ProviderKind::Glm => "GLM",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ProviderKind::Glm => &["glm", "zhipu", "glm-4.5-air", "glm_4.5_air"],
            ProviderKind::DeepSeek => &["deepseek", "deepseek-chat"],
            ProviderKind::Gemini => &["gemini"],
            ProviderKind::OpenAi => &["openai", "gpt-4o"],
        }
    }

    /// Resolve a caller-supplied provider name, ignoring case and surrounding whitespace.
    pub fn from_alias(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.aliases().contains(&name.as_str()))
    }

    /// Operator-facing list of every recognized credential key.
    pub fn credential_hint() -> &'static str {
        "GLM_API_KEY (or ZHIPU_API_KEY), DEEPSEEK_API_KEY, GEMINI_API_KEY, or OPENAI_API_KEY"
    }

    pub fn descriptor(self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.id().to_string(),
            name: self.display_name().to_string(),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unified trait for all LLM backends
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Get the provider name (e.g., "DeepSeek", "Gemini")
    fn provider_name(&self) -> &str {
        self.kind().display_name()
    }

    /// Send the prompt to the backend and return the raw text payload
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenerateError>;

    /// Generate the manual for an already trimmed, non-empty word
    async fn generate(&self, word: &str) -> Result<GameManual, GenerateError> {
        let prompt = build_prompt(word);
        let payload = self.complete(&prompt).await?;
        decode_manual(&payload).map_err(|e| GenerateError::MalformedResponse {
            provider: self.kind(),
            detail: e.to_string(),
        })
    }
}

fn trim_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Send a request and return the parsed JSON envelope.
///
/// Non-2xx replies keep the backend's status and its own `error.message`
/// in the returned error; the rest of the error body is dropped. URLs are
/// stripped from transport errors since some carry the API key.
pub(crate) async fn send_json(
    kind: ProviderKind,
    request: RequestBuilder,
) -> Result<Value, GenerateError> {
    let label = kind.api_label();
    let response = request.send().await.map_err(|e| GenerateError::Upstream {
        provider: kind,
        status: None,
        message: format!("{} API Error: request failed - {}", label, e.without_url()),
    })?;

    let status = response.status();
    if !status.is_success() {
        let backend_message = match response.json::<Value>().await {
            Ok(body) => body["error"]["message"]
                .as_str()
                .unwrap_or("Unknown API error")
                .to_string(),
            Err(_) => "Could not parse error response.".to_string(),
        };
        return Err(GenerateError::Upstream {
            provider: kind,
            status: Some(status.as_u16()),
            message: format!("{} API Error: {} - {}", label, status, backend_message),
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| GenerateError::MalformedResponse {
            provider: kind,
            detail: format!("response envelope is not JSON: {}", e.without_url()),
        })?;
    debug!("{} response: {:?}", label, body);
    Ok(body)
}

/// Pull `choices[0].message.content` out of a chat-completions envelope.
pub(crate) fn chat_content(kind: ProviderKind, body: &Value) -> Result<String, GenerateError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| unexpected_format(kind))
}

pub(crate) fn unexpected_format(kind: ProviderKind) -> GenerateError {
    GenerateError::MalformedResponse {
        provider: kind,
        detail: "returned an unexpected response format".to_string(),
    }
}
