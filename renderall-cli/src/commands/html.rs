//! `renderall html <template> [<bindings>]`: execute a single template file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use renderall_core::{Options, STATUS_OK};
use renderall_dispatch::Render;
use renderall_renderer::Templates;

use super::{emit, read_json};

/// Arguments for `renderall html`.
#[derive(Args, Debug)]
pub struct HtmlArgs {
    /// Template file. Its file name is the template name.
    pub template: PathBuf,

    /// JSON object bound to the template. Defaults to `{}`.
    pub bindings: Option<PathBuf>,

    /// Response status code.
    #[arg(long, default_value_t = STATUS_OK)]
    pub status: u16,
}

impl HtmlArgs {
    pub fn run(self, options: Options) -> Result<()> {
        let name = self
            .template
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("'{}' has no file name", self.template.display()))?;
        let source = std::fs::read_to_string(&self.template)
            .with_context(|| format!("cannot read '{}'", self.template.display()))?;
        let templates = Templates::from_raw([(name.as_str(), source.as_str())])
            .with_context(|| format!("failed to compile '{}'", self.template.display()))?;

        let binding = match &self.bindings {
            Some(path) => read_json(path)?,
            None => serde_json::json!({}),
        };

        let render = Render::new(options).with_templates(templates);
        emit(|w| render.html(w, self.status, &name, &binding))
    }
}
