use clap::Args;

use crate::core::model::TemplateType;
use crate::core::sync::{DownloadOutcome, DownloadScope, MirrorEntry, SyncEngine};
use crate::error::Result;
use crate::services::SimpleServices;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args, Debug, Default)]
pub struct DownloadArgs {
    /// Only download the item with this exact remote name
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub async fn execute(args: DownloadArgs, scope: DownloadScope, services: &SimpleServices) -> Result<()> {
    let engine = services.create_sync_engine()?;
    run(args, scope, &engine).await
}

pub(crate) async fn run(args: DownloadArgs, scope: DownloadScope, engine: &SyncEngine) -> Result<()> {
    let pb = ProgressUtils::create_request_spinner(ProgressMessages::fetching(scope.noun()));
    let outcome = engine.download(scope, args.name.as_deref()).await;
    pb.finish_and_clear();

    match outcome? {
        DownloadOutcome::NotFound { name } => {
            eprintln!("❌ {} not found: {}", scope.noun(), name);
        }
        DownloadOutcome::Downloaded(entries) => {
            println!("\n📥 Download Complete!");
            for entry in &entries {
                println!("  - {}: {}", entry.name, entry.path.display());
            }
            let (templates, layouts) = written_counts(&entries);
            if scope == DownloadScope::All {
                println!("  📄 Templates written: {}", templates);
            }
            println!("  📐 Layouts written: {}", layouts);
            println!("  📁 Mirror: {}", engine.mirror().root().display());
        }
    }

    Ok(())
}

/// Written entries as (templates, layouts)
fn written_counts(entries: &[MirrorEntry]) -> (usize, usize) {
    let layouts = entries
        .iter()
        .filter(|entry| entry.kind == TemplateType::Layout)
        .count();
    (entries.len() - layouts, layouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::files::{BackupManager, Mirror};
    use crate::core::model::TemplateRecord;
    use crate::core::sync::testing::FakeApi;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn engine_with(dir: &TempDir, api: Arc<FakeApi>) -> SyncEngine {
        SyncEngine::new(
            api,
            Mirror::new(dir.path()),
            BackupManager::new(dir.path(), dir.path().join("backup")),
            "staging",
        )
    }

    #[tokio::test]
    async fn test_unknown_name_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(FakeApi::default());
        let engine = engine_with(&dir, api);

        let args = DownloadArgs {
            name: Some("Nope".to_string()),
        };
        assert!(run(args, DownloadScope::All, &engine).await.is_ok());
        assert!(!dir.path().join("templates").exists());
    }

    #[tokio::test]
    async fn test_download_layouts_writes_layout_entry() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(FakeApi::with_catalog(vec![TemplateRecord {
            template_id: Some(5),
            name: Some(Some("Shell".to_string())),
            html_body: Some(Some("{{{ @content }}}".to_string())),
            template_type: Some(Some(TemplateType::Layout)),
            ..Default::default()
        }]));
        let engine = engine_with(&dir, api);

        run(DownloadArgs::default(), DownloadScope::Layouts, &engine)
            .await
            .unwrap();

        assert!(dir.path().join("layouts/Shell/layout.json").exists());
    }

    #[test]
    fn test_written_counts_split_by_kind() {
        let entry = |kind, name: &str| MirrorEntry {
            kind,
            name: name.to_string(),
            path: PathBuf::from(name),
        };
        let entries = vec![
            entry(TemplateType::Standard, "Welcome"),
            entry(TemplateType::Layout, "Shell"),
            entry(TemplateType::Standard, "Receipt"),
        ];

        assert_eq!(written_counts(&entries), (2, 1));
        assert_eq!(written_counts(&[]), (0, 0));
    }
}
