//! Error types for the utility crate

pub type Result<T> = std::result::Result<T, VixError>;

#[derive(Debug, thiserror::Error)]
pub enum VixError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sink write failure
    #[error("sink '{name}' failed: {message}")]
    Sink { name: String, message: String },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Async flush did not complete in time
    #[error("flush did not complete within {0:?}")]
    FlushTimeout(std::time::Duration),

    /// Error raised by [`crate::Logger::fail`]
    #[error("{0}")]
    Failure(String),
}

impl VixError {
    /// Create a sink failure error
    pub fn sink(name: impl Into<String>, message: impl Into<String>) -> Self {
        VixError::Sink {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        VixError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a failure error
    pub fn failure(msg: impl Into<String>) -> Self {
        VixError::Failure(msg.into())
    }
}
