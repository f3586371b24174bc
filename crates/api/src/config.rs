use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: bool,
    /// Used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            engine: EngineConfig {
                base_url: "http://localhost:8000".to_string(),
                model: "en_core_web_sm".to_string(),
                request_timeout_secs: 30,
            },
            logging: LoggingConfig {
                json: false,
                filter: "api=info,extract=info,nlp=info,tower_http=info".to_string(),
            },
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Defaults overridden by `MINDMAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("MINDMAP_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "MINDMAP_PORT")? {
            config.server.port = port;
        }
        if let Some(url) = lookup("MINDMAP_ENGINE_URL") {
            config.engine.base_url = url;
        }
        if let Some(model) = lookup("MINDMAP_ENGINE_MODEL") {
            config.engine.model = model;
        }
        if let Some(secs) = parse_var(&lookup, "MINDMAP_ENGINE_TIMEOUT_SECS")? {
            config.engine.request_timeout_secs = secs;
        }
        if let Some(json) = parse_var(&lookup, "MINDMAP_LOG_JSON")? {
            config.logging.json = json;
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid value {:?} for {}", raw, key)),
        None => Ok(None),
    }
}
