use std::path::{Path, PathBuf};
use crate::config::env::{EnvParser, EnvVars};
use crate::config::validation::ConfigValidator;
use crate::config::{
    Config, DEFAULT_ACCOUNT_BASE_URL, DEFAULT_API_BASE_URL, DEFAULT_PREVIEW_LAYOUT_PORT,
    DEFAULT_PREVIEW_PORT, DEFAULT_SERVER_NAME,
};
use crate::error::{ConfigError, Result, SyncError};

/// Configuration builder with validation and type safety
#[derive(Default)]
pub struct ConfigBuilder {
    server_token: Option<String>,
    server_id: Option<String>,
    server_name: Option<String>,
    api_base_url: Option<String>,
    account_base_url: Option<String>,
    sync_root: Option<PathBuf>,
    preview_port: Option<u16>,
    preview_layout_port: Option<u16>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_token<S: Into<String>>(mut self, token: S) -> Result<Self> {
        let token = token.into();
        ConfigValidator::validate_non_empty(&token, EnvVars::SERVER_TOKEN)?;
        self.server_token = Some(token);
        Ok(self)
    }

    pub fn server_id<S: Into<String>>(mut self, id: S) -> Result<Self> {
        let id = id.into();
        ConfigValidator::validate_non_empty(&id, EnvVars::SERVER_ID)?;
        self.server_id = Some(id);
        Ok(self)
    }

    pub fn server_name<S: Into<String>>(mut self, name: S) -> Self {
        self.server_name = Some(name.into());
        self
    }

    /// Set the REST endpoint with validation
    pub fn api_base_url<S: Into<String>>(mut self, url: S) -> Result<Self> {
        let url = url.into();
        ConfigValidator::validate_url(&url, "Postmark API")?;
        self.api_base_url = Some(url.trim_end_matches('/').to_string());
        Ok(self)
    }

    /// Set the web console base with validation
    pub fn account_base_url<S: Into<String>>(mut self, url: S) -> Result<Self> {
        let url = url.into();
        ConfigValidator::validate_url(&url, "Postmark account")?;
        self.account_base_url = Some(url.trim_end_matches('/').to_string());
        Ok(self)
    }

    pub fn sync_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sync_root = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn preview_port(mut self, port: u16) -> Result<Self> {
        ConfigValidator::validate_range(port, 1, u16::MAX, "preview port")?;
        self.preview_port = Some(port);
        Ok(self)
    }

    pub fn preview_layout_port(mut self, port: u16) -> Result<Self> {
        ConfigValidator::validate_range(port, 1, u16::MAX, "layout preview port")?;
        self.preview_layout_port = Some(port);
        Ok(self)
    }

    /// Load values from environment variables with validation
    pub fn load_from_env(mut self) -> Result<Self> {
        if let Some(token) = EnvParser::parse_string(EnvVars::SERVER_TOKEN)? {
            self = self.server_token(token)?;
        }

        if let Some(id) = EnvParser::parse_string(EnvVars::SERVER_ID)? {
            self = self.server_id(id)?;
        }

        if let Some(name) = EnvParser::parse_string(EnvVars::SERVER_NAME)? {
            self = self.server_name(name);
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::API_URL)? {
            self = self.api_base_url(url)?;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::ACCOUNT_URL)? {
            self = self.account_base_url(url)?;
        }

        if let Some(root) = EnvParser::parse_path(EnvVars::SYNC_DIR)? {
            self = self.sync_root(root);
        }

        if let Some(port) = EnvParser::parse_u16(EnvVars::PREVIEW_PORT, 1, u16::MAX)? {
            self = self.preview_port(port)?;
        }

        if let Some(port) = EnvParser::parse_u16(EnvVars::PREVIEW_LAYOUT_PORT, 1, u16::MAX)? {
            self = self.preview_layout_port(port)?;
        }

        Ok(self)
    }

    /// Build the configuration, failing on missing required values
    pub fn build(self) -> Result<Config> {
        let server_token = self.server_token.ok_or_else(|| ConfigError::MissingField {
            field: EnvVars::SERVER_TOKEN.to_string(),
        })?;
        let server_id = self.server_id.ok_or_else(|| ConfigError::MissingField {
            field: EnvVars::SERVER_ID.to_string(),
        })?;

        let config = Config {
            server_token,
            server_id,
            server_name: self
                .server_name
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            account_base_url: self
                .account_base_url
                .unwrap_or_else(|| DEFAULT_ACCOUNT_BASE_URL.to_string()),
            sync_root: self.sync_root.unwrap_or_else(|| PathBuf::from(".")),
            preview_port: self.preview_port.unwrap_or(DEFAULT_PREVIEW_PORT),
            preview_layout_port: self
                .preview_layout_port
                .unwrap_or(DEFAULT_PREVIEW_LAYOUT_PORT),
        };

        config.validate()?;

        Ok(config)
    }
}

impl Config {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_non_empty(&self.server_token, EnvVars::SERVER_TOKEN)?;
        ConfigValidator::validate_non_empty(&self.server_id, EnvVars::SERVER_ID)?;
        ConfigValidator::validate_non_empty(&self.server_name, EnvVars::SERVER_NAME)?;
        ConfigValidator::validate_url(&self.api_base_url, "Postmark API")?;
        ConfigValidator::validate_url(&self.account_base_url, "Postmark account")?;

        if self.preview_port == self.preview_layout_port {
            return Err(SyncError::Config(ConfigError::InvalidValue {
                field: EnvVars::PREVIEW_LAYOUT_PORT.to_string(),
                value: format!("{} (same as {})", self.preview_layout_port, EnvVars::PREVIEW_PORT),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> ConfigBuilder {
        ConfigBuilder::new()
            .server_token("token")
            .unwrap()
            .server_id("42")
            .unwrap()
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = required().build().unwrap();

        assert_eq!(config.server_token, "token");
        assert_eq!(config.server_id, "42");
        assert_eq!(config.server_name, DEFAULT_SERVER_NAME);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.sync_root, PathBuf::from("."));
        assert_eq!(config.preview_port, 3000);
        assert_eq!(config.preview_layout_port, 3001);
    }

    #[test]
    fn test_config_builder_missing_token() {
        let err = ConfigBuilder::new().server_id("42").unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::MissingField { ref field }) if field == "POSTMARK_SERVER_TOKEN"
        ));
    }

    #[test]
    fn test_config_builder_missing_server_id() {
        let err = ConfigBuilder::new().server_token("t").unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            SyncError::Config(ConfigError::MissingField { ref field }) if field == "POSTMARK_SERVER_ID"
        ));
    }

    #[test]
    fn test_config_builder_rejects_bad_url() {
        let result = required().api_base_url("not-a-url");
        assert!(matches!(result, Err(SyncError::Validation(_))));
    }

    #[test]
    fn test_config_builder_trims_trailing_slash() {
        let config = required()
            .api_base_url("http://127.0.0.1:9000/")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_config_builder_rejects_shared_preview_port() {
        let err = required()
            .preview_port(4000)
            .unwrap()
            .preview_layout_port(4000)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(ConfigError::InvalidValue { .. })));
    }
}
