//! Commands that move templates between Postmark and the local mirror

pub mod backup;
pub mod download;
pub mod upload;
