//! Errors raised while building a progress indicator from configuration.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = RadialProgressError> = std::result::Result<T, E>;

/// Everything that can reject a widget configuration.
///
/// Out-of-range runtime values (progress above max, negative max) are not
/// errors: the setters correct them silently.
#[derive(Debug, Error)]
pub enum RadialProgressError {
    /// An attribute carried a value the widget does not understand, such as an
    /// unknown direction code or a malformed color.
    #[error("invalid configuration for `{key}`: {reason}")]
    InvalidConfiguration {
        /// Attribute key that was rejected.
        key: &'static str,
        /// Human readable cause.
        reason: String,
    },
    /// The attribute document itself could not be parsed.
    #[error("failed to parse attributes: {0}")]
    Attributes(#[from] toml::de::Error),
}

impl RadialProgressError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            key,
            reason: reason.into(),
        }
    }
}
