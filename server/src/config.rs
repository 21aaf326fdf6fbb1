use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;
use tictactoe_core::SearchConfig;

pub const ADDR_VAR: &str = "TICTACTOE_ADDR";
pub const ENGINE_CONFIG_VAR: &str = "TICTACTOE_ENGINE_CONFIG";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
/// Budget for IDS and MCTS when no engine config file is given.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TICTACTOE_ADDR '{value}': {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("failed to read engine config {}: {source}", .path.display())]
    ReadEngineConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config {}: {source}", .path.display())]
    ParseEngineConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Search defaults; each request's own config is layered over these.
    pub engine_defaults: SearchConfig,
}

impl ServerConfig {
    /// Reads [`ADDR_VAR`] and [`ENGINE_CONFIG_VAR`] from the environment.
    ///
    /// # Errors
    ///
    /// Fails on an unparsable address or an unreadable or malformed engine
    /// config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { value, source })?;

        let engine_defaults = match lookup(ENGINE_CONFIG_VAR) {
            Some(path) => load_engine_config(PathBuf::from(path))?,
            None => SearchConfig::default().with_time_budget_ms(DEFAULT_TIME_BUDGET_MS),
        };

        Ok(Self {
            addr,
            engine_defaults,
        })
    }
}

fn load_engine_config(path: PathBuf) -> Result<SearchConfig, ConfigError> {
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(source) => return Err(ConfigError::ReadEngineConfig { path, source }),
    };
    SearchConfig::load_from_json(&json)
        .map_err(|source| ConfigError::ParseEngineConfig { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(
            config.engine_defaults.time_budget_ms,
            Some(DEFAULT_TIME_BUDGET_MS)
        );
    }

    #[test]
    fn test_custom_addr() {
        let config = ServerConfig::from_lookup(lookup(&[(ADDR_VAR, "0.0.0.0:8080")])).unwrap();
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn test_invalid_addr() {
        let err = ServerConfig::from_lookup(lookup(&[(ADDR_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
        assert!(err.to_string().contains("TICTACTOE_ADDR"));
    }

    #[test]
    fn test_engine_config_file() {
        let path = std::env::temp_dir().join(format!(
            "tictactoe-engine-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "maxDepth": 5, "simulationCount": 100 }"#).unwrap();

        let config =
            ServerConfig::from_lookup(lookup(&[(ENGINE_CONFIG_VAR, path.to_str().unwrap())]))
                .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.engine_defaults.max_depth, Some(5));
        assert_eq!(config.engine_defaults.simulation_count, Some(100));
        assert_eq!(config.engine_defaults.time_budget_ms, None);
    }

    #[test]
    fn test_missing_engine_config_file() {
        let err = ServerConfig::from_lookup(lookup(&[(
            ENGINE_CONFIG_VAR,
            "/nonexistent/tictactoe/engine.json",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ReadEngineConfig { .. }));
    }
}
