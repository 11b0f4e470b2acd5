use std::env;
use std::path::PathBuf;
use crate::error::{Result, SyncError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const SERVER_TOKEN: &'static str = "POSTMARK_SERVER_TOKEN";
    pub const SERVER_ID: &'static str = "POSTMARK_SERVER_ID";
    pub const SERVER_NAME: &'static str = "POSTMARK_SERVER_NAME";
    pub const API_URL: &'static str = "POSTMARK_API_URL";
    pub const ACCOUNT_URL: &'static str = "POSTMARK_ACCOUNT_URL";
    pub const SYNC_DIR: &'static str = "POSTMARK_SYNC_DIR";
    pub const PREVIEW_PORT: &'static str = "POSTMARK_PREVIEW_PORT";
    pub const PREVIEW_LAYOUT_PORT: &'static str = "POSTMARK_PREVIEW_LAYOUT_PORT";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as a trimmed, non-empty string
    pub fn parse_string(var_name: &str) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(SyncError::Validation(format!(
                "Environment variable {} contains invalid UTF-8",
                var_name
            ))),
        }
    }

    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name)?.map(PathBuf::from))
    }

    /// Parse environment variable as a port number within `min..=max`
    pub fn parse_u16(var_name: &str, min: u16, max: u16) -> Result<Option<u16>> {
        if let Some(value_str) = Self::parse_string(var_name)? {
            let value = value_str.parse::<u16>().map_err(|_| {
                SyncError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be an integer between {} and {}",
                    var_name, value_str, min, max
                ))
            })?;

            if value < min || value > max {
                return Err(SyncError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }
}
