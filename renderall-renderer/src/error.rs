//! Error types for renderall-renderer.

use thiserror::Error;

/// All errors a renderer can report back to the dispatcher.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Value could not be encoded as JSON (also covers write failures hit
    /// while streaming).
    #[error("json encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template lookup or execution failed.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// I/O failure raised by a custom [`Engine`](crate::Engine) through `?`.
    /// The built-in renderers treat body writes as best-effort and never
    /// return it.
    #[error("render io error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTML render was requested but no template set is attached.
    #[error("no template set configured; cannot render template '{name}'")]
    MissingTemplates { name: String },

    /// Failure reported by a custom [`Engine`](crate::Engine) implementation.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
