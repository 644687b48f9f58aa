//! Error types for project I/O and export.
//!
//! The projection engine itself never fails; only file handling does.

use thiserror::Error;

/// Errors raised while loading, saving or exporting.
#[derive(Error, Debug)]
pub enum PrevisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid project: {0}")]
    InvalidProject(String),
}

pub type Result<T> = std::result::Result<T, PrevisError>;
