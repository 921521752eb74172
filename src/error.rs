//! Error types for topograph operations.

use thiserror::Error;

/// Errors that can occur while building a layout or emitting an artifact.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid capture scene: {0}")]
    InvalidScene(String),

    #[error("Capture target not found: {0}")]
    MissingCaptureTarget(String),

    #[error("Failed to encode {format}: {reason}")]
    EncodeFailed { format: &'static str, reason: String },

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("An export is already in flight")]
    ExportInFlight,

    #[error("Export cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
