//! Runtime configuration for the relay, read once at startup

use serde::{Deserialize, Serialize};
use log::debug;
use crate::error::Error;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_API_BASE: &str
  = "https://generativelanguage.googleapis.com";
pub const DEFAULT_FALLBACK_MODELS: [&str; 2]
  = ["gemini-1.5-flash", "gemini-1.5-flash-8b"];
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig
{   /// Gemini API key; `None` keeps the relay in unconfigured mode
    #[serde(skip_serializing)]
    pub api_key: Option<String>
  , /// Primary model, tried first
    pub model: String
  , /// API version path segment (e.g. "v1", "v1beta")
    pub api_version: String
  , /// Upstream base URL without trailing slash
    pub api_base: String
  , /// Models tried in order after a 404 from the primary
    pub fallback_models: Vec<String>
  , /// Per-request timeout in seconds
    pub timeout_secs: u64
  , /// Bind host
    pub host: String
  , /// Bind port
    pub port: u16
  , /// Directory served for the static pages
    pub static_dir: String
}

impl Default for RelayConfig
{   fn default() -> Self
    {   RelayConfig
        {   api_key: None
          , model: DEFAULT_MODEL.to_string()
          , api_version: DEFAULT_API_VERSION.to_string()
          , api_base: DEFAULT_API_BASE.to_string()
          , fallback_models: DEFAULT_FALLBACK_MODELS
              .iter()
              .map(|m| m.to_string())
              .collect()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
          , host: DEFAULT_HOST.to_string()
          , port: DEFAULT_PORT
          , static_dir: DEFAULT_STATIC_DIR.to_string()
        }
    }
}

impl RelayConfig
{   /// Build from the process environment
    pub fn from_env() -> Result<Self, Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where F: Fn(&str) -> Option<String>
    {   let defaults = RelayConfig::default();
        let non_empty = |name: &str| {
          lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        };

        let fallback_models = match lookup("GEMINI_FALLBACK_MODELS")
        {   Some(list) => list
              .split(',')
              .map(|m| m.trim())
              .filter(|m| !m.is_empty())
              .map(|m| m.to_string())
              .collect()
          , None => defaults.fallback_models
        };

        let timeout_secs = match non_empty("GEMINI_TIMEOUT_SECS")
        {   Some(raw) => raw.parse::<u64>().map_err(|e| {
              Error::InvalidConfiguration(
                format!("GEMINI_TIMEOUT_SECS '{}': {}", raw, e)
              )
            })?
          , None => defaults.timeout_secs
        };

        let port = match non_empty("RELAY_PORT")
        {   Some(raw) => raw.parse::<u16>().map_err(|e| {
              Error::InvalidConfiguration(
                format!("RELAY_PORT '{}': {}", raw, e)
              )
            })?
          , None => defaults.port
        };

        let config = RelayConfig
        {   api_key: non_empty("GEMINI_API_KEY")
            // the primary is trimmed and defaulted per call
          , model: lookup("GEMINI_MODEL").unwrap_or(defaults.model)
          , api_version: non_empty("GEMINI_API_VERSION")
              .unwrap_or(defaults.api_version)
          , api_base: non_empty("GEMINI_API_BASE")
              .map(|b| b.trim_end_matches('/').to_string())
              .unwrap_or(defaults.api_base)
          , fallback_models
          , timeout_secs
          , host: non_empty("RELAY_HOST").unwrap_or(defaults.host)
          , port
          , static_dir: non_empty("RELAY_STATIC_DIR")
              .unwrap_or(defaults.static_dir)
        };

        debug!(
          "Loaded config: model={} version={} key_set={}",
          config.model,
          config.api_version,
          config.has_api_key()
        );
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool
    {   self.api_key.is_some()
    }
}
