//! Error types for the slider controller.

use thiserror::Error;

/// Errors surfaced by configuration loading and the controller lifecycle.
///
/// Render passes never return these: collaborator failures during a pass
/// are logged and counted in the pass report instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlideError {
    /// Configuration could not be parsed or holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A documented precondition does not hold (inverted range, empty window)
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// The slider widget could not be configured
    #[error("Slider widget unavailable: {0}")]
    SliderUnavailable(String),

    /// A map, marker, or label call failed
    #[error("Collaborator call failed: {0}")]
    Collaborator(String),

    /// Marker data could not be interpreted
    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    #[error("Control is not mounted")]
    NotMounted,

    #[error("Control is already mounted")]
    AlreadyMounted,
}

pub type Result<T> = std::result::Result<T, SlideError>;
