use std::env;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{Result, SyncError};

/// Opens a URL for the operator. Launch is fire-and-forget.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Uses `$BROWSER` when set, otherwise the platform's default opener.
#[derive(Debug, Default, Clone)]
pub struct SystemBrowser;

impl SystemBrowser {
    pub fn new() -> Self {
        SystemBrowser
    }

    fn command_for(url: &str) -> Command {
        if let Ok(browser) = env::var("BROWSER") {
            let mut parts = browser.split_whitespace();
            if let Some(program) = parts.next() {
                let mut cmd = Command::new(program);
                cmd.args(parts).arg(url);
                return cmd;
            }
        }

        Self::platform_command(url)
    }

    #[cfg(target_os = "macos")]
    fn platform_command(url: &str) -> Command {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn platform_command(url: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(url);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn platform_command(url: &str) -> Command {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let mut cmd = Self::command_for(url);
        debug!("Launching browser: {:?}", cmd);

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SyncError::Internal(anyhow::anyhow!("Failed to launch browser for {}: {}", url, e)))?;

        Ok(())
    }
}
