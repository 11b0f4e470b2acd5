use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::model::TemplateType;
use crate::error::{ConfigError, Result};

pub mod builder;
pub mod env;
pub mod validation;

pub use builder::ConfigBuilder;

pub const DEFAULT_API_BASE_URL: &str = "https://api.postmarkapp.com";
pub const DEFAULT_ACCOUNT_BASE_URL: &str = "https://account.postmarkapp.com";
pub const DEFAULT_SERVER_NAME: &str = "postmark-server";
pub const DEFAULT_PREVIEW_PORT: u16 = 3000;
pub const DEFAULT_PREVIEW_LAYOUT_PORT: u16 = 3001;

/// Immutable runtime configuration, built once at startup and shared with
/// every command through the service container.
#[derive(Clone)]
pub struct Config {
    /// Server API token sent as `X-Postmark-Server-Token`
    pub server_token: String,

    /// Numeric server ID used to build web-editor URLs
    pub server_id: String,

    /// Human-readable server name, used as the backup folder
    pub server_name: String,

    /// Postmark REST endpoint
    pub api_base_url: String,

    /// Postmark web console
    pub account_base_url: String,

    /// Directory holding `templates/`, `layouts/` and `backup/`
    pub sync_root: PathBuf,

    /// Local preview port for templates
    pub preview_port: u16,

    /// Local preview port for layouts
    pub preview_layout_port: u16,
}

impl Config {
    /// Load configuration from the environment, reading `.env` (or the given
    /// file) first.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
                debug!("Loaded environment from {}", path.display());
            }
            None => {
                if let Ok(path) = dotenvy::dotenv() {
                    debug!("Loaded environment from {}", path.display());
                }
            }
        }

        ConfigBuilder::new().load_from_env()?.build()
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.sync_root.join("backup")
    }

    pub fn preview_port_for(&self, kind: TemplateType) -> u16 {
        match kind {
            TemplateType::Standard => self.preview_port,
            TemplateType::Layout => self.preview_layout_port,
        }
    }

    /// Web-console edit URL for a template or layout on the configured server.
    pub fn editor_url(&self, template_id: u64) -> String {
        format!(
            "{}/servers/{}/templates/{}/edit",
            self.account_base_url.trim_end_matches('/'),
            self.server_id,
            template_id
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_token", &"<redacted>")
            .field("server_id", &self.server_id)
            .field("server_name", &self.server_name)
            .field("api_base_url", &self.api_base_url)
            .field("account_base_url", &self.account_base_url)
            .field("sync_root", &self.sync_root)
            .field("preview_port", &self.preview_port)
            .field("preview_layout_port", &self.preview_layout_port)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn test_config(root: &Path) -> Config {
    Config {
        server_token: "test-token".to_string(),
        server_id: "12345".to_string(),
        server_name: "staging".to_string(),
        api_base_url: DEFAULT_API_BASE_URL.to_string(),
        account_base_url: DEFAULT_ACCOUNT_BASE_URL.to_string(),
        sync_root: root.to_path_buf(),
        preview_port: DEFAULT_PREVIEW_PORT,
        preview_layout_port: DEFAULT_PREVIEW_LAYOUT_PORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_url() {
        let config = test_config(Path::new("."));
        assert_eq!(
            config.editor_url(42),
            "https://account.postmarkapp.com/servers/12345/templates/42/edit"
        );
    }

    #[test]
    fn test_backup_directory() {
        let config = test_config(Path::new("/work"));
        assert_eq!(config.backup_dir(), PathBuf::from("/work/backup"));
    }

    #[test]
    fn test_preview_ports_per_kind() {
        let config = test_config(Path::new("."));
        assert_eq!(config.preview_port_for(TemplateType::Standard), 3000);
        assert_eq!(config.preview_port_for(TemplateType::Layout), 3001);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = test_config(Path::new("."));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
