//! Error handling for P4Lens
//!
//! The exploration core never fails: malformed documents degrade to neutral
//! values. This type covers the fallible edges around it (config files, the
//! loader thread, document transport).

use thiserror::Error;

/// Main error type for P4Lens operations
#[derive(Error, Debug)]
pub enum P4LensError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// The fetched document is not a usable program structure
    #[error("Document error: {0}")]
    Document(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax errors in a fetched document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<P4LensError>,
    },
}

impl P4LensError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        P4LensError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for P4Lens operations
pub type Result<T> = std::result::Result<T, P4LensError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<P4LensError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
