use crate::error::{GenEditError, Result};
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Server startup configuration. Built once at process start and handed to the
/// processing endpoint; a missing credential is a startup fault.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model_id: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenEditError::ConfigError(
                "Google API Key is required".into(),
            ));
        }

        Ok(Config {
            api_key,
            model_id: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        })
    }

    /// Reads the process environment only. Binaries load `.env` once at
    /// startup, before anything reads configuration.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, so callers can supply
    /// something other than the process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY").unwrap_or_default();
        let mut config = Config::new(api_key)?;

        if let Some(model) = lookup("GENEDIT_MODEL").filter(|s| !s.is_empty()) {
            config.model_id = model;
        }
        if let Some(base) = lookup("GENEDIT_API_BASE").filter(|s| !s.is_empty()) {
            config.base_url = base;
        }
        if let Some(host) = lookup("HOST").filter(|s| !s.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| {
                GenEditError::ConfigError(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the request orchestrator sends submissions.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let endpoint = env::var("GENEDIT_ENDPOINT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::default().endpoint);

        ClientConfig { endpoint }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn process_url(&self) -> String {
        format!("{}/api/process", self.endpoint.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let env = vars(&[("PORT", "8080")]);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, GenEditError::ConfigError(_)));

        let env = vars(&[("GOOGLE_API_KEY", "   ")]);
        assert!(Config::from_vars(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn reads_overrides_and_defaults() {
        let env = vars(&[
            ("GOOGLE_API_KEY", "secret"),
            ("PORT", "8088"),
            ("GENEDIT_MODEL", "gemini-test"),
        ]);
        let config = Config::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.port, 8088);
        assert_eq!(config.model_id, "gemini-test");
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
    }

    #[test]
    fn from_env_is_a_view_of_the_process_environment() {
        let direct = Config::from_vars(|key| env::var(key).ok());
        let loaded = Config::from_env();
        assert_eq!(format!("{:?}", loaded), format!("{:?}", direct));
    }

    #[test]
    fn bad_port_is_rejected() {
        let env = vars(&[("GOOGLE_API_KEY", "secret"), ("PORT", "http")]);
        assert!(Config::from_vars(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config::new("super-secret").unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn process_url_joins_cleanly() {
        let client = ClientConfig::new().with_endpoint("http://localhost:9000/");
        assert_eq!(client.process_url(), "http://localhost:9000/api/process");
    }
}
