use thiserror::Error;

use crate::document::ElementId;

/// Unified result type for the moodboard crate.
pub type Result<T> = std::result::Result<T, MoodboardError>;

/// Errors surfaced by the layout engine.
#[derive(Debug, Error)]
pub enum MoodboardError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("element {0} is not managed by this layout")]
    UnknownElement(ElementId),
    #[error("document error: {0}")]
    Document(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Rejected layout options.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("coverage must be within (0, 1], got {0}")]
    Coverage(f64),
    #[error("variation must be within [0, 1], got {0}")]
    Variation(f64),
}
