use std::path::PathBuf;

use thiserror::Error;

use crate::types::DEFAULT_RAW_LENGTH;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: PathBuf,
    pub raw_length: f64,
    pub log_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            catalog_path: PathBuf::from("window_data.json"),
            raw_length: DEFAULT_RAW_LENGTH,
            log_file: PathBuf::from("development.log"),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `CATALOG_PATH`, `RAW_LENGTH` and `LOG_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(path) = lookup("CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("RAW_LENGTH") {
            config.raw_length = parse_raw_length(&raw).map_err(|reason| ConfigError::Invalid {
                key: "RAW_LENGTH",
                value: raw.clone(),
                reason,
            })?;
        }
        if let Some(path) = lookup("LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

pub fn parse_raw_length(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("raw length must be positive, got {s}"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:3001");
        assert_eq!(config.raw_length, 19.0);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8000"),
            ("CATALOG_PATH", "/data/catalog.json"),
            ("RAW_LENGTH", "20.5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.catalog_path, PathBuf::from("/data/catalog.json"));
        assert_eq!(config.raw_length, 20.5);
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = ServerConfig::from_lookup(lookup(&[("RAW_LENGTH", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RAW_LENGTH", .. }));
    }

    #[test]
    fn test_parse_raw_length() {
        assert_eq!(parse_raw_length("19"), Ok(19.0));
        assert!(parse_raw_length("0").is_err());
        assert!(parse_raw_length("abc").is_err());
        assert!(parse_raw_length("inf").is_err());
    }
}
