//! `renderall data <file>`: raw bytes, written verbatim.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use renderall_core::{Options, ResponseWriter, CONTENT_TYPE, STATUS_OK};
use renderall_dispatch::Render;

use super::emit;

/// Arguments for `renderall data`.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// File whose bytes become the response body.
    pub file: PathBuf,

    /// Response status code.
    #[arg(long, default_value_t = STATUS_OK)]
    pub status: u16,

    /// Content type to preset on the response; takes precedence over
    /// application/octet-stream.
    #[arg(long, value_name = "TYPE")]
    pub content_type: Option<String>,
}

impl DataArgs {
    pub fn run(self, options: Options) -> Result<()> {
        let bytes = std::fs::read(&self.file)
            .with_context(|| format!("cannot read '{}'", self.file.display()))?;
        let render = Render::new(options);

        emit(|w| {
            if let Some(content_type) = self.content_type {
                w.headers_mut().set(CONTENT_TYPE, content_type);
            }
            render.data(w, self.status, &bytes)
        })
    }
}
