//! Command Line Interface module
//!
//! Commands are grouped by what they touch:
//! - `sync`: talk to Postmark (download, download-layouts, upload) and back up the mirror
//! - `local`: work from the mirror alone (preview, preview-layout, open, open-layout)

pub mod local;
pub mod sync;

pub use local::*;
pub use sync::*;
