//! Local mirror of the remote catalog
//!
//! - `mirror`: per-template directories with JSON metadata and body files
//! - `backup`: timestamped snapshots of the mirror

pub mod backup;
pub mod mirror;

pub use backup::BackupManager;
pub use mirror::Mirror;
