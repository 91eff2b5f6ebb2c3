//! Error types for notehub.
//!
//! Two layers of errors exist. [`DomainError`] is the small, cloneable error
//! that travels inside events and cache entries: every transport failure is
//! normalized into it with a human-readable message. [`NotehubError`] is the
//! crate-level error for everything outside the event loop (configuration,
//! themes, I/O) and wraps domain errors via `#[from]`.

use thiserror::Error;

/// Error surfaced by the list and mutation workflows.
///
/// No distinction is made between HTTP status classes and connectivity
/// failures; they all become [`DomainError::Transport`].
///
/// # Examples
///
/// ```
/// use notehub::domain::DomainError;
///
/// let error = DomainError::Transport("Request failed with status code 401".to_string());
/// assert_eq!(error.to_string(), "Request failed with status code 401");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Network or HTTP failure reported by the API client.
    #[error("{0}")]
    Transport(String),

    /// User input rejected before any request was made.
    #[error("{0}")]
    Validation(String),
}

/// The main error type for notehub operations outside the event loop.
#[derive(Debug, Error)]
pub enum NotehubError {
    /// A list or mutation workflow failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or a value such as the
    /// bearer token cannot be turned into an HTTP header.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for notehub operations.
pub type Result<T> = std::result::Result<T, NotehubError>;
