//! renderall: preview HTTP responses produced by the render service.
//!
//! # Usage
//!
//! ```text
//! renderall [--config <yaml>] data <file> [--status N] [--content-type T]
//! renderall [--config <yaml>] json <file> [--status N] [--indent] [--stream] [--unescape-html] [--prefix P]
//! renderall [--config <yaml>] jsonp <callback> <file> [--status N] [--indent]
//! renderall [--config <yaml>] html <template> [<bindings.json>] [--status N]
//! ```
//!
//! The full response (status line, headers, blank line, body) is written to
//! stdout. Logs go to stderr; set `RUST_LOG` to change verbosity.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    data::DataArgs,
    html::HtmlArgs,
    json::{JsonArgs, JsonpArgs},
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "renderall",
    version,
    about = "Render values as HTTP responses (raw data, JSON, JSONP, HTML templates)",
    long_about = None,
)]
struct Cli {
    /// Options file (YAML). Defaults to <config dir>/renderall/config.yaml when present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a file's bytes verbatim as application/octet-stream.
    Data(DataArgs),

    /// Encode a JSON file as a JSON response.
    Json(JsonArgs),

    /// Encode a JSON file as a JSONP response.
    Jsonp(JsonpArgs),

    /// Execute a template file against JSON bindings.
    Html(HtmlArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = commands::load_options(cli.config.as_deref())?;
    match cli.command {
        Commands::Data(args) => args.run(options),
        Commands::Json(args) => args.run(options),
        Commands::Jsonp(args) => args.run(options),
        Commands::Html(args) => args.run(options),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
