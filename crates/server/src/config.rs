//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use forecast_facade::{ForecastError, ForecasterConfig, LagModelConfig, DEFAULT_MAX_HORIZON};
use history_facade::{StoreConfig, StoreError};

/// Configuration errors; reported once at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("HISTORY_FILE is required when HISTORY_STORE=json_file")]
    MissingHistoryFile,

    #[error("model configuration rejected: {0}")]
    Model(#[from] ForecastError),

    #[error("history store could not be opened: {0}")]
    Store(#[from] StoreError),
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            name,
            reason: reason.to_string(),
        }
    }
}

/// Everything the service needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub forecaster: ForecasterConfig,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            forecaster: ForecasterConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `BASELINE_*` and `HISTORY_*` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or(defaults.host);
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", e))?,
            None => defaults.port,
        };

        let order = match var("BASELINE_ORDER") {
            Some(raw) => parse_positive("BASELINE_ORDER", &raw)?,
            None => LagModelConfig::default().order,
        };
        let weights = var("BASELINE_WEIGHTS")
            .map(|raw| parse_weights(&raw))
            .transpose()?;
        let clamp_to_history = match var("BASELINE_CLAMP") {
            Some(raw) => parse_bool("BASELINE_CLAMP", &raw)?,
            None => false,
        };
        let max_horizon = match var("BASELINE_MAX_HORIZON") {
            Some(raw) => parse_positive("BASELINE_MAX_HORIZON", &raw)?,
            None => DEFAULT_MAX_HORIZON,
        };

        let history_file = var("HISTORY_FILE").map(PathBuf::from);
        let store = match var("HISTORY_STORE").as_deref().map(str::trim) {
            None | Some("memory") => StoreConfig::Memory { seed: history_file },
            Some("json_file") => StoreConfig::JsonFile {
                path: history_file.ok_or(ConfigError::MissingHistoryFile)?,
            },
            Some(other) => {
                return Err(ConfigError::invalid(
                    "HISTORY_STORE",
                    format!("unknown store '{}', expected memory or json_file", other),
                ))
            }
        };

        let config = Self {
            host,
            port,
            forecaster: ForecasterConfig {
                model: LagModelConfig {
                    order,
                    weights,
                    clamp_to_history,
                },
                max_horizon,
            },
            store,
        };
        config.forecaster.model.build()?;
        Ok(config)
    }

    /// Socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::invalid("HOST", e))
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::invalid(name, "must be at least 1")),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::invalid(name, e)),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(
            name,
            format!("'{}' is not a boolean", other),
        )),
    }
}

/// Comma-separated weights, oldest lag first.
fn parse_weights(raw: &str) -> Result<Vec<f64>, ConfigError> {
    raw.split(',')
        .map(|w| {
            w.trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::invalid("BASELINE_WEIGHTS", format!("'{}': {}", w.trim(), e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr().unwrap().port(), 8081);
        assert_eq!(config.forecaster.model.order, 4);
        assert_eq!(config.forecaster.max_horizon, 1024);
    }

    #[test]
    fn test_model_settings() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BASELINE_WEIGHTS", "0.1, 0.2,0.7"),
            ("BASELINE_CLAMP", "true"),
            ("BASELINE_MAX_HORIZON", "36"),
        ]))
        .unwrap();
        assert_eq!(config.forecaster.model.weights, Some(vec![0.1, 0.2, 0.7]));
        assert!(config.forecaster.model.clamp_to_history);
        assert_eq!(config.forecaster.max_horizon, 36);
    }

    #[test]
    fn test_store_settings() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HISTORY_STORE", "json_file"),
            ("HISTORY_FILE", "/data/history.json"),
        ]))
        .unwrap();
        assert_eq!(
            config.store,
            StoreConfig::JsonFile {
                path: PathBuf::from("/data/history.json")
            }
        );

        let seeded =
            ServerConfig::from_lookup(lookup(&[("HISTORY_FILE", "/data/seed.json")])).unwrap();
        assert_eq!(seeded.store.kind(), "memory");
    }

    #[test]
    fn test_json_file_requires_path() {
        let err = ServerConfig::from_lookup(lookup(&[("HISTORY_STORE", "json_file")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingHistoryFile));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            vec![("PORT", "eighty")],
            vec![("PORT", "70000")],
            vec![("BASELINE_ORDER", "0")],
            vec![("BASELINE_WEIGHTS", "0.5,abc")],
            vec![("BASELINE_CLAMP", "maybe")],
            vec![("HISTORY_STORE", "postgres")],
        ] {
            let err = ServerConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{:?}", vars);
        }
    }

    #[test]
    fn test_zero_sum_weights_rejected_at_startup() {
        let err =
            ServerConfig::from_lookup(lookup(&[("BASELINE_WEIGHTS", "1,-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Model(_)));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", " "), ("HOST", "")])).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.host, "0.0.0.0");
    }
}
