//! Error types for the engine.

use thiserror::Error;

/// Errors that can occur while driving a command cycle.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed to send or receive. Propagated verbatim, never
    /// retried by the engine.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The stream ended (or the read guard ran out) before the tagged
    /// completion line appeared. Fatal to the in-flight command; the caller
    /// decides whether to reconnect.
    #[error("response for {tag} incomplete after {lines_seen} lines")]
    IncompleteResponse {
        /// Tag of the command that never completed.
        tag: String,
        /// Number of lines accumulated before giving up.
        lines_seen: usize,
    },

    /// A search was requested with no criteria. Rejected before any I/O.
    #[error("search criteria must contain at least one entry")]
    EmptyCriteria,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
