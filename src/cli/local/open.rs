use clap::Args;

use super::required_name;
use crate::config::Config;
use crate::core::files::Mirror;
use crate::core::model::TemplateType;
use crate::error::{MirrorError, Result};
use crate::services::SimpleServices;

#[derive(Args, Debug, Default)]
pub struct OpenArgs {
    /// Mirror folder name of the template or layout to open in Postmark
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub async fn execute(args: OpenArgs, kind: TemplateType, services: &SimpleServices) -> Result<()> {
    let name = required_name(args.name.as_deref(), kind)?;
    let config = services.config();

    let url = editor_url_for(&services.create_mirror(), &config, kind, name)?;
    services.create_browser().open(&url)?;

    println!("🌐 Opening {} '{}': {}", kind.file_stem(), name, url);
    Ok(())
}

/// Web-editor URL for a mirrored entry, from the `TemplateId` in its metadata
pub(crate) fn editor_url_for(mirror: &Mirror, config: &Config, kind: TemplateType, name: &str) -> Result<String> {
    let record = mirror.read_metadata(kind, name)?;
    let template_id = record.template_id.ok_or_else(|| MirrorError::MissingTemplateId {
        path: mirror.metadata_path(kind, name),
    })?;

    Ok(config.editor_url(template_id))
}
