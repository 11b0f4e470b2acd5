use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner styles shared by the commands that wait on Postmark
pub struct ProgressUtils;

impl ProgressUtils {
    const SPINNER_TEMPLATE: &'static str = "{spinner:.green} [{elapsed_precise}] {msg}";

    /// A ticking spinner showing `message`. It draws to stderr and hides
    /// itself when stderr is not a terminal.
    pub fn create_request_spinner(message: impl Into<String>) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template(Self::SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Common spinner messages
pub struct ProgressMessages;

impl ProgressMessages {
    pub const UPLOADING: &'static str = "Pushing local changes to Postmark...";

    pub fn fetching(scope: &str) -> String {
        format!("⬇️ Downloading {}s...", scope.to_lowercase())
    }
}
