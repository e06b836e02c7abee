//! Subcommand implementations and the helpers they share.

pub mod data;
pub mod html;
pub mod json;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use renderall_core::{Options, WireWriter};
use renderall_renderer::RenderError;

/// `<config dir>/renderall/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("renderall").join("config.yaml"))
}

/// Load options from `explicit`, else from the default path if it exists,
/// else fall back to defaults.
pub fn load_options(explicit: Option<&Path>) -> Result<Options> {
    if let Some(path) = explicit {
        return Options::load_at(path)
            .with_context(|| format!("failed to load options from '{}'", path.display()));
    }
    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "loading default options file");
            Options::load_at(&path)
                .with_context(|| format!("failed to load options from '{}'", path.display()))
        }
        _ => Ok(Options::default()),
    }
}

/// Read and parse a JSON document.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("'{}' is not valid JSON", path.display()))
}

/// Run `render` against a wire writer over stdout and flush it.
pub fn emit<F>(render: F) -> Result<()>
where
    F: FnOnce(&mut WireWriter<io::StdoutLock<'static>>) -> Result<(), RenderError>,
{
    let mut out = WireWriter::new(io::stdout().lock());
    let result = render(&mut out);
    out.flush().context("failed to flush response")?;
    result.context("render failed")
}
