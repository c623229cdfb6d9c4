use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct EchoConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub line: LineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineConfig {
    /// Channel access token used as the reply API bearer credential.
    pub channel_access_token: Secret<String>,
    /// Shared secret the platform signs callback bodies with.
    pub channel_secret: Secret<String>,
    pub api_base_url: String,
    pub enabled: bool,
}

impl EchoConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(EchoConfig {
            common,
            line: LineConfig {
                // No defaults: both credentials must be present before the
                // provider or the signature middleware can be constructed.
                channel_access_token: Secret::new(get_env(
                    "LINE_CHANNEL_ACCESS_TOKEN",
                    None,
                    is_prod,
                )?),
                channel_secret: Secret::new(get_env("LINE_CHANNEL_SECRET", None, is_prod)?),
                api_base_url: get_env("LINE_API_BASE_URL", Some("https://api.line.me"), is_prod)?,
                enabled: env::var("LINE_ENABLED")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .unwrap_or(true),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
