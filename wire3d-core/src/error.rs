//! Error types for engine operations.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while building or transforming scene objects.
///
/// Every failure is synchronous and recoverable: the operation that
/// returned it has left the world and its objects unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A parameter was outside its documented domain (non-positive zoom
    /// factor, wrong control-point count, malformed import line).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A window zoom would have shrunk the window below its minimum
    /// size. The window has been restored to its pre-zoom state.
    #[error("maximum zoom in exceeded")]
    ZoomLimitExceeded,

    /// No object with the given name exists in the world.
    #[error("no object named {0:?}")]
    NotFound(String),

    /// An object with the given name already exists in the world.
    #[error("an object named {0:?} already exists")]
    NameCollision(String),
}

impl EngineError {
    /// Create an invalid argument error.
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_limit_message() {
        assert_eq!(
            EngineError::ZoomLimitExceeded.to_string(),
            "maximum zoom in exceeded"
        );
    }

    #[test]
    fn test_not_found_names_the_object() {
        let err = EngineError::NotFound("cube".to_string());
        assert!(err.to_string().contains("cube"));
    }
}
