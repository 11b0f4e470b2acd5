use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::model::{TemplateRecord, TemplateType};
use crate::error::{FileSystemError, MirrorError, Result, SyncError};

/// Folder name for a remote template name: path separators become `_`, and
/// names that would resolve to the kind directory or its parent (`""`, `.`,
/// `..`) get a leading `_`. Applying it twice gives the same folder.
pub fn safe_file_name(name: &str) -> String {
    let name = name.replace(['/', '\\'], "_");
    match name.as_str() {
        "" | "." | ".." => format!("_{}", name),
        _ => name,
    }
}

/// On-disk copy of the remote catalog: one directory per template or layout,
/// each holding `<stem>.json`, `<stem>.html` and optionally `<stem>.txt`.
#[derive(Debug, Clone)]
pub struct Mirror {
    root: PathBuf,
}

impl Mirror {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind_dir(&self, kind: TemplateType) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    pub fn entry_dir(&self, kind: TemplateType, folder: &str) -> PathBuf {
        self.kind_dir(kind).join(safe_file_name(folder))
    }

    pub fn metadata_path(&self, kind: TemplateType, folder: &str) -> PathBuf {
        self.entry_dir(kind, folder)
            .join(format!("{}.json", kind.file_stem()))
    }

    pub fn html_path(&self, kind: TemplateType, folder: &str) -> PathBuf {
        self.entry_dir(kind, folder)
            .join(format!("{}.html", kind.file_stem()))
    }

    pub fn text_path(&self, kind: TemplateType, folder: &str) -> PathBuf {
        self.entry_dir(kind, folder)
            .join(format!("{}.txt", kind.file_stem()))
    }

    /// Write a fetched record to its entry directory and return that directory.
    pub fn write_entry(&self, record: &TemplateRecord) -> Result<PathBuf> {
        let kind = record.kind();
        let folder = record.display_name();
        let dir = self.entry_dir(kind, folder);

        fs::create_dir_all(&dir).map_err(|e| FileSystemError::at(&dir, e))?;

        let metadata_path = self.metadata_path(kind, folder);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| SyncError::Internal(e.into()))?;
        fs::write(&metadata_path, json).map_err(|e| FileSystemError::at(&metadata_path, e))?;

        Self::write_body(&self.html_path(kind, folder), record.html_body())?;
        Self::write_body(&self.text_path(kind, folder), record.text_body())?;

        debug!("Wrote mirror entry {}", dir.display());
        Ok(dir)
    }

    fn write_body(path: &Path, body: Option<&str>) -> Result<()> {
        match body {
            Some(body) if !body.is_empty() => {
                fs::write(path, body).map_err(|e| FileSystemError::at(path, e))?;
            }
            _ => {
                // A body file exists only while the remote record has that body
                let _ = fs::remove_file(path);
            }
        }
        Ok(())
    }

    /// Sorted folder names under the kind's root. A missing root is empty.
    pub fn list_entries(&self, kind: TemplateType) -> Result<Vec<String>> {
        let dir = self.kind_dir(kind);
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FileSystemError::at(&dir, e).into()),
        };

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| FileSystemError::at(&dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Parse an entry's metadata without any body overlay
    pub fn read_metadata(&self, kind: TemplateType, folder: &str) -> Result<TemplateRecord> {
        let path = self.metadata_path(kind, folder);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MirrorError::MissingMetadata { path }.into())
            }
            Err(e) => return Err(FileSystemError::at(&path, e).into()),
        };

        serde_json::from_str(&content)
            .map_err(|source| MirrorError::InvalidMetadata { path, source }.into())
    }

    /// Metadata with the sibling HTML and TXT files overlaid onto
    /// `HtmlBody` and `TextBody`. Missing body files leave the JSON values.
    pub fn read_entry(&self, kind: TemplateType, folder: &str) -> Result<TemplateRecord> {
        let mut record = self.read_metadata(kind, folder)?;

        if let Ok(html) = fs::read_to_string(self.html_path(kind, folder)) {
            record.html_body = Some(Some(html));
        }
        if let Ok(text) = fs::read_to_string(self.text_path(kind, folder)) {
            record.text_body = Some(Some(text));
        }

        Ok(record)
    }

    /// The editable HTML body of an entry
    pub fn read_body(&self, kind: TemplateType, folder: &str) -> Result<String> {
        let path = self.html_path(kind, folder);
        fs::read_to_string(&path).map_err(|_| MirrorError::MissingBody { path }.into())
    }
}
