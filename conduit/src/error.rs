//! Errors raised by generated connectors at call time.

use thiserror::Error;

/// Convenience alias used by every generated connector method.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors from URI assembly, argument checks and the transport.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was `None`.
    #[error("{message}")]
    NullArgument {
        /// The assertion message supplied by the caller.
        message: String,
    },

    /// A placeholder had no named value and no positional values were given.
    #[error("URI template variable '{name}' is not resolved in '{template}'")]
    UnresolvedVariable {
        /// The placeholder name.
        name: String,
        /// The template being expanded.
        template: String,
    },

    /// The positional value list ran out before every placeholder was filled.
    #[error("Not enough variable values available to expand '{name}' in '{template}'")]
    MissingVariable {
        /// The first placeholder left without a value.
        name: String,
        /// The template being expanded.
        template: String,
    },

    /// The template itself is malformed (for example an unclosed brace).
    #[error("Invalid URI template '{template}': {message}")]
    InvalidTemplate {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        message: String,
    },

    /// The expanded URI failed to parse.
    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    /// The remote side answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Message or body text returned with the status.
        message: String,
    },

    /// Any failure reported by a [`Transport`](crate::Transport) implementation.
    #[error("Transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Creates a null-argument error.
    pub fn null_argument(message: impl Into<String>) -> Self {
        Self::NullArgument {
            message: message.into(),
        }
    }

    /// Wraps a transport-specific failure.
    pub fn transport(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(source.into())
    }

    /// Returns the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
