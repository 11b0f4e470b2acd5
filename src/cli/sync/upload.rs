use clap::Args;

use crate::core::sync::{SyncEngine, UploadReport};
use crate::error::Result;
use crate::services::SimpleServices;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args, Debug, Default)]
pub struct UploadArgs {
    /// Only upload the mirror folder with this name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub async fn execute(args: UploadArgs, services: &SimpleServices) -> Result<()> {
    let engine = services.create_sync_engine()?;
    let name = args.name.clone();
    let report = run(args, &engine).await?;

    if let Some(name) = unmatched_filter(name.as_deref(), &report) {
        eprintln!("❌ No mirror folder named '{}' under templates/ or layouts/", name);
        println!("  💾 Backup: {}", report.backup.path.display());
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

/// The requested folder name when it matched no mirror entry
fn unmatched_filter<'a>(name: Option<&'a str>, report: &UploadReport) -> Option<&'a str> {
    name.filter(|_| report.is_empty())
}

pub(crate) async fn run(args: UploadArgs, engine: &SyncEngine) -> Result<UploadReport> {
    let pb = ProgressUtils::create_request_spinner(ProgressMessages::UPLOADING);
    let report = engine.upload(args.name.as_deref()).await;
    pb.finish_and_clear();
    report
}

fn print_report(report: &UploadReport) {
    println!("\n📤 Upload Complete!");
    println!(
        "  💾 Backup: {} ({} files)",
        report.backup.path.display(),
        report.backup.files_copied
    );
    println!("  ✅ Updated: {}", report.updated.len());
    for entry in &report.updated {
        println!(
            "    - {} '{}' ({})",
            entry.kind.file_stem(),
            entry.name,
            entry.path.display()
        );
    }

    if !report.skipped.is_empty() {
        println!("  ⚠️  Skipped: {}", report.skipped.len());
        for skipped in &report.skipped {
            println!(
                "    - {}/{}: {}",
                skipped.kind.dir_name(),
                skipped.folder,
                skipped.reason
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::files::{BackupManager, Mirror};
    use crate::core::model::{TemplateRecord, TemplateType};
    use crate::core::sync::testing::FakeApi;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_pushes_named_folder() {
        let dir = TempDir::new().unwrap();
        let mirror = Mirror::new(dir.path());
        for (id, name) in [(1, "Welcome"), (2, "Receipt")] {
            mirror
                .write_entry(&TemplateRecord {
                    template_id: Some(id),
                    name: Some(Some(name.to_string())),
                    html_body: Some(Some(format!("<p>{}</p>", name))),
                    template_type: Some(Some(TemplateType::Standard)),
                    ..Default::default()
                })
                .unwrap();
        }
        fs::write(mirror.html_path(TemplateType::Standard, "Welcome"), "<p>edited</p>").unwrap();

        let api = Arc::new(FakeApi::default());
        let engine = SyncEngine::new(
            api.clone(),
            mirror,
            BackupManager::new(dir.path(), dir.path().join("backup")),
            "staging",
        );

        let report = run(
            UploadArgs {
                name: Some("Welcome".to_string()),
            },
            &engine,
        )
        .await
        .unwrap();

        assert_eq!(report.updated.len(), 1);
        assert_eq!(report.backup.files_copied, 4);
        let updates = api.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, 1);
        assert_eq!(updates[0].1.html_body, Some(Some("<p>edited</p>".to_string())));
    }

    #[tokio::test]
    async fn test_unmatched_name_is_reported() {
        let dir = TempDir::new().unwrap();
        let engine = SyncEngine::new(
            Arc::new(FakeApi::default()),
            Mirror::new(dir.path()),
            BackupManager::new(dir.path(), dir.path().join("backup")),
            "staging",
        );

        let report = run(
            UploadArgs {
                name: Some("Missing".to_string()),
            },
            &engine,
        )
        .await
        .unwrap();

        assert_eq!(unmatched_filter(Some("Missing"), &report), Some("Missing"));
        assert_eq!(unmatched_filter(None, &report), None);
    }
}
