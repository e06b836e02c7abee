//! `renderall json` / `renderall jsonp`: encode a JSON file.
//!
//! Flags override the loaded options for this invocation only.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use renderall_core::{Options, STATUS_OK};
use renderall_dispatch::Render;

use super::{emit, read_json};

/// Arguments for `renderall json`.
#[derive(Args, Debug)]
pub struct JsonArgs {
    /// JSON document to render.
    pub file: PathBuf,

    /// Response status code.
    #[arg(long, default_value_t = STATUS_OK)]
    pub status: u16,

    /// Pretty-print with two-space indentation.
    #[arg(long)]
    pub indent: bool,

    /// Encode straight onto the response instead of buffering.
    #[arg(long, conflicts_with_all = ["indent", "unescape_html"])]
    pub stream: bool,

    /// Emit <, > and & literally instead of as \u escapes.
    #[arg(long)]
    pub unescape_html: bool,

    /// Bytes to write before the document.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl JsonArgs {
    pub fn run(self, mut options: Options) -> Result<()> {
        options.indent_json |= self.indent;
        options.streaming_json |= self.stream;
        options.unescape_html |= self.unescape_html;
        if let Some(prefix) = self.prefix {
            options.prefix_json = prefix;
        }

        let value = read_json(&self.file)?;
        let render = Render::new(options);
        emit(|w| render.json(w, self.status, &value))
    }
}

/// Arguments for `renderall jsonp`.
#[derive(Args, Debug)]
pub struct JsonpArgs {
    /// JavaScript function name to wrap the document in.
    pub callback: String,

    /// JSON document to render.
    pub file: PathBuf,

    /// Response status code.
    #[arg(long, default_value_t = STATUS_OK)]
    pub status: u16,

    /// Pretty-print with two-space indentation.
    #[arg(long)]
    pub indent: bool,
}

impl JsonpArgs {
    pub fn run(self, mut options: Options) -> Result<()> {
        options.indent_json |= self.indent;

        let value = read_json(&self.file)?;
        let render = Render::new(options);
        emit(|w| render.jsonp(w, self.status, &self.callback, &value))
    }
}
