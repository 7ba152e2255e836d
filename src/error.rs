use thiserror::Error;

/// Errors raised by the overlap and collision layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollisionError {
    /// A value of the wrong kind was supplied where a collider or a real number was required.
    #[error("type error: {0}")]
    Type(String),
    /// A numeric value fell outside its allowed bounds.
    #[error("range error: {0}")]
    Range(String),
    /// A proportional box would have zero width or height.
    #[error("degenerate bounds: {0}")]
    Degenerate(String),
    /// The operation is illegal in the current state.
    #[error("invalid state: {0}")]
    State(String),
    /// Overlap geometry was read while no overlap is recorded.
    #[error("not ready: {0}")]
    NotReady(String),
}

impl CollisionError {
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::Range(message.into())
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::NotReady(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CollisionError>;
