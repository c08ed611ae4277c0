//! Error types for extension setup.

use std::path::PathBuf;

/// Errors raised while building the extension from configuration.
///
/// Configuration is the only fallible phase; matching and rendering are total
/// functions over their inputs.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    /// The header dataset file does not exist.
    #[error("header dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// The header dataset file could not be read.
    #[error("failed to read header dataset {}: {source}", path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The link template is missing the `{rfc}` placeholder.
    #[error("link template {0:?} does not contain the {{rfc}} placeholder")]
    Template(String),
}
