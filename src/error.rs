//! Error types for preference loading and store lifecycle
//!
//! Resolving preferences never fails: every lookup on a store degrades to a
//! default or `None`. The errors here cover the edges around the store, such
//! as reading a bag from JSON, compiling query patterns and attaching a store
//! to a host. All fallible public functions return [`Result<T, Error>`].

/// Errors that can occur while loading bags or managing stores
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error while reading a bag from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bag must be a mapping at the top level
    #[error("Expected a JSON object at the top level, found {0}")]
    NotADictionary(&'static str),

    /// Invalid glob pattern in query
    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(String),

    /// The host already owns a preferences store
    #[error("Web contents already has preferences attached")]
    AlreadyAttached,
}

/// Result type alias for convenience
///
/// # Example
///
/// ```rust
/// use webprefs::{PrefDict, Result};
///
/// fn load(content: &str) -> Result<PrefDict> {
///     let bag = PrefDict::from_json_str(content)?;
///     Ok(bag)
/// }
///
/// assert!(load(r#"{"sandbox": true}"#).is_ok());
/// assert!(load("[1, 2]").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
