//! Core functionality modules
//!
//! This module contains the template sync logic organized into layers:
//! - `model`: Postmark template records and the update payload
//! - `services`: Postmark API client
//! - `files`: Local mirror layout and backup snapshots
//! - `infrastructure`: Browser launching and the preview server
//! - `sync`: Download, upload and backup pipelines

pub mod files;
pub mod infrastructure;
pub mod model;
pub mod services;
pub mod sync;
