//! Error handling for the postmark-sync application
//!
//! This module provides a hierarchical error system with user-friendly error
//! messages. Commands propagate these errors up to `main`, which prints them
//! and exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mirror error: {0}")]
    Mirror(#[from] MirrorError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed (HTTP {status}): check POSTMARK_SERVER_TOKEN")]
    Authentication { status: u16 },

    #[error("Postmark returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Cannot listen on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to access {path}: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {reason}")]
    Walk { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to load env file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Metadata file not found: {path}")]
    MissingMetadata { path: PathBuf },

    #[error("Invalid metadata in {path}: {source}")]
    InvalidMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Body file not readable: {path}")]
    MissingBody { path: PathBuf },

    #[error("No TemplateId recorded in {path}")]
    MissingTemplateId { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl FileSystemError {
    pub fn at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileSystemError::Path {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(NetworkError::Http(err))
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Network(NetworkError::InvalidResponse {
            reason: err.to_string(),
        })
    }
}

impl From<tokio::task::JoinError> for SyncError {
    fn from(err: tokio::task::JoinError) -> Self {
        SyncError::Internal(err.into())
    }
}
