use clap::Args;
use tracing::warn;

use super::required_name;
use crate::core::files::Mirror;
use crate::core::infrastructure::{BrowserLauncher, PreviewHandle, PreviewServer};
use crate::core::model::TemplateType;
use crate::error::Result;
use crate::services::SimpleServices;

#[derive(Args, Debug, Default)]
pub struct PreviewArgs {
    /// Mirror folder name of the template or layout to preview
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub async fn execute(args: PreviewArgs, kind: TemplateType, services: &SimpleServices) -> Result<()> {
    let name = required_name(args.name.as_deref(), kind)?;
    let config = services.config();
    let server = services.create_preview_server();
    let browser = services.create_browser();

    let handle = start_preview(
        &services.create_mirror(),
        kind,
        name,
        config.preview_port_for(kind),
        server.as_ref(),
        browser.as_ref(),
    )
    .await?;

    println!("👀 Previewing {} '{}' at {}", kind.file_stem(), name, handle.url());
    println!("  Press Ctrl+C to stop");

    handle.wait().await
}

/// Serve the stored HTML body of `name` and point the browser at it.
/// Nothing is bound when the body cannot be read.
pub(crate) async fn start_preview(
    mirror: &Mirror,
    kind: TemplateType,
    name: &str,
    port: u16,
    server: &dyn PreviewServer,
    browser: &dyn BrowserLauncher,
) -> Result<PreviewHandle> {
    let html = mirror.read_body(kind, name)?;
    let handle = server.start(html, port).await?;

    if let Err(e) = browser.open(handle.url()) {
        warn!("Could not open browser, visit {} manually: {}", handle.url(), e);
    }

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::infrastructure::browser::testing::RecordingBrowser;
    use crate::core::infrastructure::preview::testing::RecordingPreviewServer;
    use crate::core::model::TemplateRecord;
    use crate::error::{MirrorError, SyncError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_preview_serves_layout_body_on_layout_port() {
        let dir = TempDir::new().unwrap();
        let mirror = Mirror::new(dir.path());
        mirror
            .write_entry(&TemplateRecord {
                template_id: Some(4),
                name: Some(Some("Shell".to_string())),
                html_body: Some(Some("<main>{{{ @content }}}</main>".to_string())),
                template_type: Some(Some(TemplateType::Layout)),
                ..Default::default()
            })
            .unwrap();
        let server = RecordingPreviewServer::default();
        let browser = RecordingBrowser::default();

        let handle = start_preview(&mirror, TemplateType::Layout, "Shell", 3001, &server, &browser)
            .await
            .unwrap();

        assert_eq!(
            server.served.lock().unwrap().clone(),
            vec![("<main>{{{ @content }}}</main>".to_string(), 3001)]
        );
        assert_eq!(browser.opened.lock().unwrap().clone(), vec![handle.url().to_string()]);
        handle.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_preview_missing_body_binds_nothing() {
        let dir = TempDir::new().unwrap();
        let server = RecordingPreviewServer::default();
        let browser = RecordingBrowser::default();

        let result = start_preview(
            &Mirror::new(dir.path()),
            TemplateType::Standard,
            "Missing",
            3000,
            &server,
            &browser,
        )
        .await;

        assert!(matches!(result, Err(SyncError::Mirror(MirrorError::MissingBody { .. }))));
        assert!(server.served.lock().unwrap().is_empty());
        assert!(browser.opened.lock().unwrap().is_empty());
    }
}
