//! Error types for drishya-map.

use thiserror::Error;

/// drishya-map error type.
///
/// External perception models (segmenter, embedder, captioner) are opaque;
/// their failures are wrapped here and are fatal for the current frame or
/// captioning pass. The one exception is relation reasoning during graph
/// construction, which degrades per-edge instead of aborting (see
/// [`crate::graph`]).
#[derive(Error, Debug)]
pub enum DrishyaError {
    #[error("Segmentation failed: {0}")]
    Segmentation(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Captioning failed: {0}")]
    Captioning(String),

    #[error("Relation reasoning failed: {0}")]
    Relation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
}

impl From<crate::config::ConfigLoadError> for DrishyaError {
    fn from(e: crate::config::ConfigLoadError) -> Self {
        DrishyaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrishyaError>;
