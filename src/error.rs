//! Error types for mdspan.
//!
//! Rendering itself cannot fail; errors only come from reading input and
//! configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdspan operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a document or config file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid TOML or has mistyped keys.
    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Rendered output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
