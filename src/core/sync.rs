//! Download, upload and backup pipelines between Postmark and the mirror.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::files::backup::{BackupManager, BackupSnapshot};
use crate::core::files::mirror::{safe_file_name, Mirror};
use crate::core::model::{TemplateSummary, TemplateType, TemplateUpdate};
use crate::core::services::postmark::TemplateApi;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadScope {
    /// Every remote template, layouts included
    All,
    /// Only records whose `TemplateType` is `Layout`
    Layouts,
}

impl DownloadScope {
    fn includes(self, summary: &TemplateSummary) -> bool {
        match self {
            DownloadScope::All => true,
            DownloadScope::Layouts => summary.template_type == TemplateType::Layout,
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            DownloadScope::All => "Template",
            DownloadScope::Layouts => "Layout",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MirrorEntry {
    pub kind: TemplateType,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum DownloadOutcome {
    NotFound { name: String },
    Downloaded(Vec<MirrorEntry>),
}

#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub kind: TemplateType,
    pub folder: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct UploadReport {
    pub backup: BackupSnapshot,
    pub updated: Vec<MirrorEntry>,
    pub skipped: Vec<SkippedEntry>,
}

impl UploadReport {
    /// No mirror entry was pushed or skipped
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.skipped.is_empty()
    }
}

pub struct SyncEngine {
    api: Arc<dyn TemplateApi>,
    mirror: Mirror,
    backups: BackupManager,
    server_name: String,
}

impl SyncEngine {
    pub fn new(
        api: Arc<dyn TemplateApi>,
        mirror: Mirror,
        backups: BackupManager,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            api,
            mirror,
            backups,
            server_name: server_name.into(),
        }
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    /// Pull every selected remote item, or only the one named `name`.
    /// An unknown name writes nothing.
    pub async fn download(&self, scope: DownloadScope, name: Option<&str>) -> Result<DownloadOutcome> {
        let mut selected: Vec<TemplateSummary> = self
            .api
            .list_templates()
            .await?
            .into_iter()
            .filter(|summary| scope.includes(summary))
            .collect();

        if let Some(name) = name {
            match selected.iter().position(|summary| summary.name == name) {
                Some(index) => selected = vec![selected.swap_remove(index)],
                None => {
                    return Ok(DownloadOutcome::NotFound {
                        name: name.to_string(),
                    })
                }
            }
        }

        debug!("Downloading {} remote items", selected.len());

        let mut written = Vec::with_capacity(selected.len());
        for summary in selected {
            let record = self.api.get_template(summary.template_id).await?;
            let path = self.mirror.write_entry(&record)?;
            let kind = record.kind();
            let name = record.name().map(str::to_string).unwrap_or(summary.name);

            info!("Downloaded {}: {}", kind.file_stem(), name);
            written.push(MirrorEntry { kind, name, path });
        }

        Ok(DownloadOutcome::Downloaded(written))
    }

    pub fn backup(&self) -> Result<BackupSnapshot> {
        self.backups.create_snapshot(&self.server_name)
    }

    /// Snapshot the mirror, then push every entry (or only the folder named
    /// `folder`), templates first, then layouts. A failed backup stops the
    /// upload before anything is sent. Entries already pushed stay pushed
    /// when a later request fails.
    pub async fn upload(&self, folder: Option<&str>) -> Result<UploadReport> {
        let backup = self.backup()?;
        let folder = folder.map(safe_file_name);

        let mut updated = Vec::new();
        let mut skipped = Vec::new();

        for kind in TemplateType::ALL {
            for entry in self.mirror.list_entries(kind)? {
                if folder.as_deref().is_some_and(|wanted| wanted != entry) {
                    continue;
                }

                let record = match self.mirror.read_entry(kind, &entry) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("Skipping {} '{}': {}", kind.file_stem(), entry, e);
                        skipped.push(SkippedEntry {
                            kind,
                            folder: entry,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

                let (Some(template_id), Some(name)) = (record.template_id, record.name().map(str::to_string)) else {
                    warn!("Skipping {} '{}': TemplateId and Name are required", kind.file_stem(), entry);
                    skipped.push(SkippedEntry {
                        kind,
                        folder: entry,
                        reason: "TemplateId and Name are required".to_string(),
                    });
                    continue;
                };

                self.api
                    .update_template(template_id, &TemplateUpdate::from(&record))
                    .await?;

                info!("Updated {}: {}", kind.file_stem(), name);
                updated.push(MirrorEntry {
                    kind,
                    name,
                    path: self.mirror.entry_dir(kind, &entry),
                });
            }
        }

        Ok(UploadReport {
            backup,
            updated,
            skipped,
        })
    }
}
