use std::sync::Arc;

use crate::config::Config;
use crate::core::files::{BackupManager, Mirror};
use crate::core::infrastructure::{BrowserLauncher, HttpPreviewServer, PreviewServer, SystemBrowser};
use crate::core::services::{PostmarkClient, TemplateApi};
use crate::core::sync::SyncEngine;
use crate::error::Result;

pub struct SimpleServices {
    config: Arc<Config>,
}

impl SimpleServices {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn create_client(&self) -> Result<Arc<dyn TemplateApi>> {
        Ok(Arc::new(PostmarkClient::from_config(&self.config)?))
    }

    pub fn create_mirror(&self) -> Mirror {
        Mirror::new(&self.config.sync_root)
    }

    pub fn create_backup_manager(&self) -> BackupManager {
        BackupManager::new(&self.config.sync_root, self.config.backup_dir())
    }

    pub fn create_sync_engine(&self) -> Result<SyncEngine> {
        Ok(SyncEngine::new(
            self.create_client()?,
            self.create_mirror(),
            self.create_backup_manager(),
            self.config.server_name.clone(),
        ))
    }

    pub fn create_browser(&self) -> Box<dyn BrowserLauncher> {
        Box::new(SystemBrowser::new())
    }

    pub fn create_preview_server(&self) -> Box<dyn PreviewServer> {
        Box::new(HttpPreviewServer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use tempfile::TempDir;

    #[test]
    fn test_components_share_sync_root() {
        let dir = TempDir::new().unwrap();
        let services = SimpleServices::new(test_config(dir.path()));

        assert_eq!(services.create_mirror().root(), dir.path());
        assert!(services.create_sync_engine().is_ok());
        assert_eq!(services.config().server_name, "staging");
    }
}
