//! Error definitions
//!
//! This module provides error types for mox-matchers.
//!
//! A failed assertion is not an error: matchers report it as a
//! [`MatcherResult`](crate::message::MatcherResult) with `pass == false`.
//! [`Error::AssertionFailed`] only appears when a host turns such a result
//! into a `Result`.

use thiserror::Error;

/// Main error type for mox-matchers
#[derive(Error, Debug)]
pub enum Error {
    /// The subject cannot be handled by the matcher at all, e.g. a
    /// non-promise passed to a promise matcher. This is a test authoring bug.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Assertion failed
    #[error("{0}")]
    AssertionFailed(String),

    /// No matcher registered under the given name
    #[error("Unknown matcher: {0}")]
    UnknownMatcher(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid operand error.
    #[must_use]
    pub fn invalid_operand(message: impl Into<String>) -> Self {
        Self::InvalidOperand(message.into())
    }

    /// Create an assertion failure.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` for a failed expectation as opposed to a hard error.
    #[must_use]
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::AssertionFailed(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
