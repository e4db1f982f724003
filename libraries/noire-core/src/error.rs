/// Core error types for the Noire player
use thiserror::Error;

/// Result type alias using `NoireError`
pub type Result<T> = std::result::Result<T, NoireError>;

/// Core error type for the Noire player
#[derive(Error, Debug)]
pub enum NoireError {
    /// Catalog lookup failed (shown to the user by the calling page)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// User profile lookup failed
    #[error("Profile error: {0}")]
    Profile(String),

    /// Durable storage errors (skip policy persistence)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unknown subscription plan name
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl NoireError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a profile error
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error must be surfaced to the user.
    ///
    /// Only catalog and profile fetches produce user-visible notices; storage
    /// and asset failures degrade silently.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Profile(_))
    }
}
