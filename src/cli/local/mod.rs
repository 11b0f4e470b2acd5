//! Commands that work from the local mirror without calling the API

pub mod open;
pub mod preview;

use crate::core::model::TemplateType;
use crate::error::{Result, SyncError};

/// The name argument of a local command, rejecting a missing or blank one.
pub(crate) fn required_name(name: Option<&str>, kind: TemplateType) -> Result<&str> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(SyncError::Validation(format!(
            "Please provide a {} name",
            kind.file_stem()
        ))),
    }
}
