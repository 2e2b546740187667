//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}='{value}'")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply process
/// environment overrides.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ProxyConfig = toml::from_str(&content)?;
    config.apply_env_overrides(|name| std::env::var(name).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from `path` when given, otherwise start from defaults. Environment
/// overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    let mut config = ProxyConfig::default();
    config.apply_env_overrides(|name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl ProxyConfig {
    /// Apply `PORT`, `BUHO_UPSTREAM_URL` and `LOG_LEVEL` from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.listener.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env { name: "PORT", value: port.clone() })?;
        }
        if let Some(url) = lookup("BUHO_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.observability.log_level = level;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn port_override() {
        let mut config = ProxyConfig::default();
        config.apply_env_overrides(env(&[("PORT", "8443")])).unwrap();
        assert_eq!(config.listener.port, 8443);
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut config = ProxyConfig::default();
        let err = config
            .apply_env_overrides(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "PORT", .. }));
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn upstream_and_log_level_overrides() {
        let mut config = ProxyConfig::default();
        config
            .apply_env_overrides(env(&[
                ("BUHO_UPSTREAM_URL", "http://127.0.0.1:9000"),
                ("LOG_LEVEL", "debug"),
            ]))
            .unwrap();
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn no_overrides_leaves_defaults() {
        let mut config = ProxyConfig::default();
        config.apply_env_overrides(env(&[])).unwrap();
        assert_eq!(config.listener.port, 3000);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = ConfigError::Validation(vec![
            ValidationError::Zero("timeouts.connect_secs"),
            ValidationError::Zero("timeouts.request_secs"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.connect_secs must be greater than zero, \
             timeouts.request_secs must be greater than zero"
        );
    }
}
