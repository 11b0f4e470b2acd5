//! Operator-facing helpers that reach outside the process
//!
//! - `browser`: launching URLs in the system browser
//! - `preview`: a loopback HTTP server for rendered bodies

pub mod browser;
pub mod preview;

pub use browser::{BrowserLauncher, SystemBrowser};
pub use preview::{HttpPreviewServer, PreviewHandle, PreviewServer};
