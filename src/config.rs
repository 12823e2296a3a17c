use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::time::Duration;

/// Deployment configuration: provider credentials plus service settings.
///
/// Provider credentials use the flat names operators already know
/// (`GEMINI_API_KEY`, `DEEPSEEK_BASE_URL`, ...). Presence of a credential,
/// not its value, decides whether the provider is offered.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub glm_api_key: Option<String>,
    /// Alternate name for the GLM key
    pub zhipu_api_key: Option<String>,
    pub glm_base_url: Option<String>,
    pub zhipu_base_url: Option<String>,

    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: Option<String>,

    pub gemini_api_key: Option<String>,
    pub gemini_base_url: Option<String>,

    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "0.0.0.0:8788"
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Settings applied to every generation request
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Total request timeout for a backend call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Reject manuals that contain blank leaves
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            strict: default_strict(),
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn default_bind() -> String {
    "127.0.0.1:8788".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_strict() -> bool {
    true
}

/// Plain environment variables read as provider credentials.
const CREDENTIAL_VARS: [&str; 10] = [
    "GLM_API_KEY",
    "ZHIPU_API_KEY",
    "GLM_BASE_URL",
    "ZHIPU_BASE_URL",
    "DEEPSEEK_API_KEY",
    "DEEPSEEK_BASE_URL",
    "GEMINI_API_KEY",
    "GEMINI_BASE_URL",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
];

/// Treat blank values as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with LANGGAME__ prefix (service settings)
    /// 2. Plain environment variables (provider credentials)
    /// 3. langgame.toml file in current directory
    /// 4. Default values
    ///
    /// Environment variable format: LANGGAME__GENERATION__TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn glm_key(&self) -> Option<&str> {
        present(&self.glm_api_key).or_else(|| present(&self.zhipu_api_key))
    }

    pub fn glm_base(&self) -> Option<&str> {
        present(&self.glm_base_url).or_else(|| present(&self.zhipu_base_url))
    }

    pub fn deepseek_key(&self) -> Option<&str> {
        present(&self.deepseek_api_key)
    }

    pub fn deepseek_base(&self) -> Option<&str> {
        present(&self.deepseek_base_url)
    }

    pub fn gemini_key(&self) -> Option<&str> {
        present(&self.gemini_api_key)
    }

    pub fn gemini_base(&self) -> Option<&str> {
        present(&self.gemini_base_url)
    }

    pub fn openai_key(&self) -> Option<&str> {
        present(&self.openai_api_key)
    }

    pub fn openai_base(&self) -> Option<&str> {
        present(&self.openai_base_url)
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(std::env::vars())
}

/// Load configuration from the given environment instead of the process one.
pub fn load_config_from<I>(vars: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Map<String, String> = vars.into_iter().collect();
    let credentials: Map<String, String> = vars
        .iter()
        .filter(|(name, _)| CREDENTIAL_VARS.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("langgame").required(false))
        // Credentials: GEMINI_API_KEY -> gemini_api_key
        .add_source(Environment::default().source(Some(credentials)))
        // Service settings: LANGGAME__SERVER__BIND -> server.bind
        .add_source(
            Environment::with_prefix("LANGGAME")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars)),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

impl AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.timeout == 0 {
            return Err(ConfigError::Message(
                "generation.timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8788");
        assert_eq!(config.generation.timeout, 60);
        assert!(config.generation.strict);
        assert_eq!(config.generation.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let config = AppConfig {
            deepseek_api_key: Some("   ".to_string()),
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.deepseek_key().is_none());
        assert!(config.openai_key().is_none());
    }

    #[test]
    fn test_glm_accepts_either_key_name() {
        let config = AppConfig {
            zhipu_api_key: Some("zhipu-key".to_string()),
            zhipu_base_url: Some("https://proxy.example".to_string()),
            ..Default::default()
        };
        assert_eq!(config.glm_key(), Some("zhipu-key"));
        assert_eq!(config.glm_base(), Some("https://proxy.example"));

        let both = AppConfig {
            glm_api_key: Some("glm-key".to_string()),
            zhipu_api_key: Some("zhipu-key".to_string()),
            ..Default::default()
        };
        assert_eq!(both.glm_key(), Some("glm-key"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                gemini_api_key = "g-key"

                [server]
                bind = "0.0.0.0:9000"

                [generation]
                strict = false
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.gemini_key(), Some("g-key"));
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert!(!config.generation.strict);
        assert_eq!(config.generation.timeout, 60);
    }

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let config = load_config_from(env(&[
            ("SERVER", "nginx"),
            ("GENERATION", "3"),
            ("PATH", "/usr/bin"),
            ("GEMINI_API_KEY", "g-key"),
            ("OPENAI_BASE_URL", "https://proxy.example"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_key(), Some("g-key"));
        assert_eq!(config.openai_base(), Some("https://proxy.example"));
        assert_eq!(config.server.bind, "127.0.0.1:8788");
        assert_eq!(config.generation.timeout, 60);
    }

    #[test]
    fn test_prefixed_service_settings() {
        let config = load_config_from(env(&[
            ("LANGGAME__SERVER__BIND", "0.0.0.0:9000"),
            ("LANGGAME__GENERATION__TIMEOUT", "15"),
            ("LANGGAME__GENERATION__STRICT", "false"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.generation.timeout(), Duration::from_secs(15));
        assert!(!config.generation.strict);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = load_config_from(env(&[("LANGGAME__GENERATION__TIMEOUT", "0")]));
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }
}
