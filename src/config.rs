use anyhow::{bail, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

/// Log line format. Defaults to JSON in prod and pretty output elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn resolve(value: Option<&str>, env: &Environment) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            _ if matches!(env, Environment::Prod) => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Connection details for one LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Sampling parameters shared by every provider call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // LLM providers (absent when no API key is configured)
    pub anthropic: Option<ProviderSettings>,
    pub openai: Option<ProviderSettings>,
    pub generation: GenerationSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_format = LogFormat::resolve(env::var("LOG_FORMAT").ok().as_deref(), &env);

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Providers
        let anthropic = provider_from_env(
            "ANTHROPIC",
            "https://api.anthropic.com",
            "claude-3-5-sonnet-20241022",
        );
        let openai = provider_from_env("OPENAI", "https://api.openai.com", "gpt-4o");

        if anthropic.is_none() && openai.is_none() {
            bail!("At least one of ANTHROPIC_API_KEY or OPENAI_API_KEY must be set");
        }

        let generation = GenerationSettings {
            max_tokens: parse_env("LLM_MAX_TOKENS").unwrap_or(2000),
            // High temperature so repeated requests propose different menus
            temperature: parse_env("LLM_TEMPERATURE").unwrap_or(1.0),
            timeout_seconds: parse_env("LLM_TIMEOUT_SECONDS").unwrap_or(60),
        };

        Ok(Settings {
            env,
            server_addr,
            log_format,
            cors_allow_origins,
            anthropic,
            openai,
            generation,
        })
    }
}

#[cfg(test)]
impl Settings {
    /// Dev settings with no provider keys, for router tests.
    pub fn for_tests() -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            log_format: LogFormat::Pretty,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            anthropic: None,
            openai: None,
            generation: GenerationSettings {
                max_tokens: 2000,
                temperature: 1.0,
                timeout_seconds: 60,
            },
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn provider_from_env(prefix: &str, default_url: &str, default_model: &str) -> Option<ProviderSettings> {
    let api_key = env::var(format!("{prefix}_API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty())?;

    let base_url =
        env::var(format!("{prefix}_BASE_URL")).unwrap_or_else(|_| default_url.to_string());
    let model = env::var(format!("{prefix}_MODEL")).unwrap_or_else(|_| default_model.to_string());

    Some(ProviderSettings {
        api_key,
        base_url,
        model,
    })
}
