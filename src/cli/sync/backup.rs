use clap::Args;
use tracing::error;

use crate::core::files::BackupManager;
use crate::error::Result;
use crate::services::SimpleServices;

#[derive(Args, Debug, Default)]
pub struct BackupArgs {}

pub async fn execute(_args: BackupArgs, services: &SimpleServices) -> Result<()> {
    let config = services.config();
    run(&services.create_backup_manager(), &config.server_name);
    Ok(())
}

/// A failed manual snapshot is reported but does not fail the command.
pub(crate) fn run(manager: &BackupManager, server_name: &str) {
    match manager.create_snapshot(server_name) {
        Ok(snapshot) => {
            println!("💾 Backup created: {}", snapshot.path.display());
            println!("  📄 Files copied: {}", snapshot.files_copied);
        }
        Err(e) => error!("Backup failed: {}", e),
    }
}
