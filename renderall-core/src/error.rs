//! Error types for renderall-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading render options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, is a directory, etc.).
    #[error("I/O error reading options at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse options at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML parse error for options supplied inline rather than from a file.
    #[error("failed to parse options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The options file did not exist at the given path.
    #[error("options file not found at {path}")]
    NotFound { path: PathBuf },
}
