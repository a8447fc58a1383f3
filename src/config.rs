use crate::errors::{DeribitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub venue: VenueConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub error_log: ErrorLogConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VenueConfig {
    pub api_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorLogConfig {
    pub max_entries: usize,
}

impl Default for ErrorLogConfig {
    fn default() -> Self {
        Self { max_entries: 1024 }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DeribitError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.venue.api_url.is_empty() {
            return Err(DeribitError::ConfigError(
                "venue.api_url must be set".to_string(),
            ));
        }

        if !self.venue.api_url.starts_with("http://") && !self.venue.api_url.starts_with("https://")
        {
            return Err(DeribitError::ConfigError(format!(
                "venue.api_url must be an http(s) URL, got '{}'",
                self.venue.api_url
            )));
        }

        if self.error_log.max_entries == 0 {
            return Err(DeribitError::ConfigError(
                "error_log.max_entries must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Expand environment variables in configuration
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.credentials.client_id = expand_env_var(&self.credentials.client_id)?;
        self.credentials.client_secret = expand_env_var(&self.credentials.client_secret)?;
        Ok(())
    }
}

/// Replace a `${VAR}` value with the environment variable it names
fn expand_env_var(value: &str) -> Result<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).map_err(|_| {
            DeribitError::ConfigError(format!("Environment variable {} not set", var_name))
        })
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            venue: VenueConfig {
                api_url: "https://test.deribit.com/api/v2".to_string(),
            },
            credentials: CredentialsConfig {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            error_log: ErrorLogConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = sample_config();
        config.venue.api_url = "test.deribit.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = sample_config();
        config.error_log.max_entries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("DERIBIT_TEST_SECRET", "s3cret");
        let mut config = sample_config();
        config.credentials.client_secret = "${DERIBIT_TEST_SECRET}".to_string();
        config.expand_env_vars().unwrap();
        assert_eq!(config.credentials.client_secret, "s3cret");
        std::env::remove_var("DERIBIT_TEST_SECRET");
    }

    #[test]
    fn test_expand_env_vars_missing() {
        let mut config = sample_config();
        config.credentials.client_secret = "${DERIBIT_TEST_SECRET_MISSING}".to_string();
        assert!(config.expand_env_vars().is_err());
    }

    #[test]
    fn test_error_log_config_defaults() {
        let toml_str = r#"
            [venue]
            api_url = "https://test.deribit.com/api/v2"

            [credentials]
            client_id = "id"
            client_secret = "secret"

            [logging]
            level = "info"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.error_log.max_entries, 1024);
    }
}
