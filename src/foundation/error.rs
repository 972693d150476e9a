use crate::expression::error::ExprError;

/// Crate-wide result alias.
pub type AttractorResult<T> = Result<T, AttractorError>;

/// Top-level error for attractor construction, configuration and rendering.
#[derive(thiserror::Error, Debug)]
pub enum AttractorError {
    /// A channel expression failed to parse or bind.
    #[error("expression error: {0}")]
    Expression(#[from] ExprError),

    /// A channel expression of an attractor failed to parse or bind.
    #[error("channel '{channel}': {source}")]
    Channel {
        /// Variable name of the failing channel.
        channel: &'static str,
        /// Underlying expression error.
        #[source]
        source: ExprError,
    },

    /// A configuration value was rejected; the previous value is retained.
    #[error("config error: {0}")]
    Config(String),

    /// A structural precondition did not hold.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Resource failures such as buffer allocation, with their context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AttractorError {
    /// Build a [`AttractorError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`AttractorError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AttractorError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
