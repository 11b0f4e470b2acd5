use chrono::{DateTime, SecondsFormat, Utc};
use globwalk::GlobWalkerBuilder;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::files::mirror::safe_file_name;
use crate::core::model::TemplateType;
use crate::error::{FileSystemError, Result};

#[derive(Debug, Clone)]
pub struct BackupSnapshot {
    pub path: PathBuf,
    pub files_copied: usize,
}

/// Copies the whole mirror into `backup/<server>/<timestamp>/` before
/// anything is pushed. Snapshots are never overwritten or pruned.
#[derive(Debug, Clone)]
pub struct BackupManager {
    mirror_root: PathBuf,
    backup_root: PathBuf,
}

impl BackupManager {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(mirror_root: P, backup_root: Q) -> Self {
        Self {
            mirror_root: mirror_root.as_ref().to_path_buf(),
            backup_root: backup_root.as_ref().to_path_buf(),
        }
    }

    /// ISO-8601 timestamp with `:` and `.` replaced, e.g. `2024-03-05T10-20-30-123Z`
    pub fn snapshot_name(now: DateTime<Utc>) -> String {
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-")
    }

    pub fn create_snapshot(&self, server_name: &str) -> Result<BackupSnapshot> {
        self.create_snapshot_at(server_name, Utc::now())
    }

    pub fn create_snapshot_at(&self, server_name: &str, now: DateTime<Utc>) -> Result<BackupSnapshot> {
        let server_dir = self.backup_root.join(safe_file_name(server_name));
        fs::create_dir_all(&server_dir).map_err(|e| FileSystemError::at(&server_dir, e))?;

        let snapshot_dir = Self::reserve_dir(&server_dir, &Self::snapshot_name(now))?;

        let mut files_copied = 0;
        for kind in TemplateType::ALL {
            let source = self.mirror_root.join(kind.dir_name());
            if !source.is_dir() {
                debug!("Nothing to back up in {}", source.display());
                continue;
            }
            let dest = snapshot_dir.join(kind.dir_name());
            files_copied += Self::copy_tree(&source, &dest)?;
        }

        info!("Backup completed in: {}", snapshot_dir.display());
        Ok(BackupSnapshot {
            path: snapshot_dir,
            files_copied,
        })
    }

    /// Create a fresh snapshot directory, suffixing `-1`, `-2`, ... when the
    /// timestamp is already taken.
    fn reserve_dir(server_dir: &Path, name: &str) -> Result<PathBuf> {
        let mut candidate = server_dir.join(name);
        let mut suffix = 0u32;
        loop {
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    suffix += 1;
                    candidate = server_dir.join(format!("{}-{}", name, suffix));
                }
                Err(e) => return Err(FileSystemError::at(&candidate, e).into()),
            }
        }
    }

    fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
        fs::create_dir_all(dest).map_err(|e| FileSystemError::at(dest, e))?;

        let walker = GlobWalkerBuilder::from_patterns(source, &["**"])
            .min_depth(1)
            .build()
            .map_err(|e| FileSystemError::Walk {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut copied = 0;
        for entry in walker {
            let entry = entry.map_err(|e| FileSystemError::Walk {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| FileSystemError::Walk {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                })?;
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| FileSystemError::at(&target, e))?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| FileSystemError::at(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| FileSystemError::at(entry.path(), e))?;
            copied += 1;
        }

        Ok(copied)
    }
}
