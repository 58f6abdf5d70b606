// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::error::ConfigError;
use std::env;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// Agent version reported in every trace.
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_APP_NAME: &str = "Application";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_LOG_LEVEL: &str = "info";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration consumed by the trace buffer
#[derive(Debug, Clone)]
pub struct Config {
    /// Epsagon account token, carried inside the trace body
    pub token: Option<String>,
    /// Application name stamped onto every trace
    pub app_name: String,
    /// Agent version
    pub version: String,
    /// Trace collector URL (e.g., https://us-east-1.tc.epsagon.com)
    pub collector_url: Option<String>,
    /// HTTPS proxy URL
    pub https_proxy: Option<String>,
    /// Log level (e.g., trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            version: AGENT_VERSION.to_string(),
            collector_url: Some(default_collector_url(DEFAULT_REGION)),
            https_proxy: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = non_empty_var("EPSAGON_TOKEN");
        let app_name =
            non_empty_var("EPSAGON_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        // EPSAGON_COLLECTOR_URL overrides the regional collector entirely
        let collector_url = non_empty_var("EPSAGON_COLLECTOR_URL").unwrap_or_else(|| {
            let region = non_empty_var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
            default_collector_url(&region)
        });

        let https_proxy =
            non_empty_var("EPSAGON_HTTPS_PROXY").or_else(|| non_empty_var("HTTPS_PROXY"));

        let debug = env::var("EPSAGON_DEBUG")
            .map(|val| val.to_lowercase() == "true")
            .unwrap_or(false);
        let log_level = if debug {
            "debug".to_string()
        } else {
            log_level_from_env()
        };

        let config = Self {
            token,
            app_name,
            version: AGENT_VERSION.to_string(),
            collector_url: Some(collector_url),
            https_proxy,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// The collector URL is not parsed here, a malformed URL is reported when the trace is sent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "EPSAGON_APP_NAME cannot be empty".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidConfig(format!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }

    /// The token, if one is set and not blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.trim().is_empty())
    }
}

// Unknown levels fall back to the default with a warning.
fn log_level_from_env() -> String {
    let Some(level) = non_empty_var("EPSAGON_LOG_LEVEL") else {
        return DEFAULT_LOG_LEVEL.to_string();
    };
    let level = level.trim().to_lowercase();
    if VALID_LOG_LEVELS.contains(&level.as_str()) {
        level
    } else {
        warn!("Invalid EPSAGON_LOG_LEVEL '{level}', using '{DEFAULT_LOG_LEVEL}'");
        DEFAULT_LOG_LEVEL.to_string()
    }
}

fn default_collector_url(region: &str) -> String {
    format!("https://{region}.tc.epsagon.com")
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}

/// Cloneable handle to the active [`Config`].
///
/// The trace buffer reads the configuration through this handle on every `reset` and `send`, so
/// replacing it between units of work takes effect on the next trace.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Arc<Config>>>,
}

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Create a handle holding the configuration read from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }

    /// Snapshot of the current configuration.
    pub fn load(&self) -> Arc<Config> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn replace(&self, config: Config) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(config);
    }

    /// Re-reads the environment. The current configuration is kept if the new one is invalid.
    pub fn reload_from_env(&self) -> Result<(), ConfigError> {
        self.replace(Config::from_env()?);
        Ok(())
    }
}

impl From<Config> for SharedConfig {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duplicate::duplicate_item;
    use serial_test::serial;

    const ENV_VARS: [&str; 8] = [
        "EPSAGON_TOKEN",
        "EPSAGON_APP_NAME",
        "EPSAGON_COLLECTOR_URL",
        "EPSAGON_HTTPS_PROXY",
        "HTTPS_PROXY",
        "EPSAGON_DEBUG",
        "EPSAGON_LOG_LEVEL",
        "AWS_REGION",
    ];

    fn clear_env() {
        for key in ENV_VARS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.app_name, "Application");
        assert_eq!(config.version, AGENT_VERSION);
        assert_eq!(
            config.collector_url.as_deref(),
            Some("https://us-east-1.tc.epsagon.com")
        );
        assert!(config.token().is_none());
    }

    #[test]
    fn test_validate_empty_app_name() {
        let config = Config {
            app_name: "  ".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid configuration: EPSAGON_APP_NAME cannot be empty"
        );
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_token_is_treated_as_missing() {
        let config = Config {
            token: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.token().is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert!(config.token.is_none());
        assert_eq!(config.app_name, "Application");
        assert_eq!(
            config.collector_url.as_deref(),
            Some("https://us-east-1.tc.epsagon.com")
        );
        assert!(config.https_proxy.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_values() {
        clear_env();
        env::set_var("EPSAGON_TOKEN", "tok-1");
        env::set_var("EPSAGON_APP_NAME", "svc");
        env::set_var("EPSAGON_COLLECTOR_URL", "http://localhost:9999/trace");
        env::set_var("HTTPS_PROXY", "http://proxy:3128");
        env::set_var("EPSAGON_LOG_LEVEL", "WARN");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.token(), Some("tok-1"));
        assert_eq!(config.app_name, "svc");
        assert_eq!(
            config.collector_url.as_deref(),
            Some("http://localhost:9999/trace")
        );
        assert_eq!(config.https_proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    #[serial]
    fn test_epsagon_proxy_takes_precedence() {
        clear_env();
        env::set_var("EPSAGON_HTTPS_PROXY", "http://epsagon-proxy:3128");
        env::set_var("HTTPS_PROXY", "http://proxy:3128");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(
            config.https_proxy.as_deref(),
            Some("http://epsagon-proxy:3128")
        );
    }

    #[test]
    #[serial]
    fn test_debug_flag_overrides_log_level() {
        clear_env();
        env::set_var("EPSAGON_DEBUG", "TRUE");
        env::set_var("EPSAGON_LOG_LEVEL", "error");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_log_level_keeps_other_settings() {
        clear_env();
        env::set_var("EPSAGON_TOKEN", "tok-1");
        env::set_var("EPSAGON_COLLECTOR_URL", "http://localhost:9999/trace");
        env::set_var("EPSAGON_LOG_LEVEL", "verbose");

        let config = Config::from_env();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.token(), Some("tok-1"));
        assert_eq!(
            config.collector_url.as_deref(),
            Some("http://localhost:9999/trace")
        );
    }

    #[duplicate_item(
        test_name                   region              expected_url;
        [test_us_east_1_collector]  ["us-east-1"]       ["https://us-east-1.tc.epsagon.com"];
        [test_us_west_2_collector]  ["us-west-2"]       ["https://us-west-2.tc.epsagon.com"];
        [test_eu_west_1_collector]  ["eu-west-1"]       ["https://eu-west-1.tc.epsagon.com"];
        [test_ap_south_1_collector] ["ap-south-1"]      ["https://ap-south-1.tc.epsagon.com"];
    )]
    #[test]
    #[serial]
    fn test_name() {
        clear_env();
        env::set_var("AWS_REGION", region);
        let config = Config::from_env().unwrap();
        clear_env();
        assert_eq!(config.collector_url.as_deref(), Some(expected_url));
    }

    #[test]
    #[serial]
    fn test_shared_config_reload() {
        clear_env();
        let shared = SharedConfig::new(Config::default());
        assert!(shared.load().token().is_none());

        env::set_var("EPSAGON_TOKEN", "tok-2");
        shared.reload_from_env().unwrap();
        clear_env();

        assert_eq!(shared.load().token(), Some("tok-2"));
    }

    #[test]
    #[serial]
    fn test_shared_config_reload_with_invalid_log_level() {
        clear_env();
        let shared = SharedConfig::new(Config::default());

        env::set_var("EPSAGON_TOKEN", "tok-3");
        env::set_var("EPSAGON_LOG_LEVEL", "loud");
        let result = shared.reload_from_env();
        clear_env();

        assert!(result.is_ok());
        assert_eq!(shared.load().token(), Some("tok-3"));
        assert_eq!(shared.load().log_level, "info");
    }

    #[test]
    fn test_shared_config_clones_observe_replace() {
        let shared = SharedConfig::default();
        let observer = shared.clone();

        shared.replace(Config {
            app_name: "svc".to_string(),
            ..Default::default()
        });

        assert_eq!(observer.load().app_name, "svc");
    }
}
