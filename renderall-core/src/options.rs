//! Render options and their resolved, immutable form.
//!
//! [`Options`] is what a user writes (every field optional, usually loaded
//! from YAML). [`Options::resolve`] fills in defaults and produces a
//! [`Config`], which the render service owns for its lifetime and shares
//! read-only across requests.
//!
//! ```yaml
//! charset: ISO-8859-1
//! indent_json: true
//! prefix_json: ")]}',\n"
//! disable_http_error_rendering: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{CONTENT_HTML, DEFAULT_CHARSET};

/// Default number of idle buffers retained by the template buffer pool.
pub const DEFAULT_BUFFER_POOL_SIZE: usize = 64;

const DEFAULT_DIRECTORY: &str = "templates";
const DEFAULT_EXTENSION: &str = ".tmpl";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// User-facing render options. Empty values mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Template directory. Carried for template loaders; unused by renderers.
    pub directory: PathBuf,
    /// Layout template name. Carried for template loaders; unused by renderers.
    pub layout: String,
    /// Template file extensions. Carried for template loaders; unused by renderers.
    pub extensions: Vec<String>,
    /// Character set appended to every textual content type.
    pub charset: String,
    /// Pretty-print JSON and JSONP with two-space indentation.
    pub indent_json: bool,
    /// Bytes written before every JSON body, e.g. `)]}',\n`.
    pub prefix_json: String,
    /// Content type for templated markup; defaults to `text/html`.
    pub html_content_type: String,
    /// Turn `\u003c`, `\u003e` and `\u0026` in buffered JSON back into `<`, `>` and `&`.
    pub unescape_html: bool,
    /// Encode JSON straight onto the response instead of buffering it first.
    pub streaming_json: bool,
    /// Skip the automatic 500 response when a renderer fails.
    pub disable_http_error_rendering: bool,
    /// Idle buffers kept by the template buffer pool.
    pub buffer_pool_size: Option<usize>,
}

impl Options {
    /// Parse options from a YAML document. A blank document yields defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Options::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load options from a YAML file.
    ///
    /// Returns `ConfigError::NotFound` if absent,
    /// `ConfigError::Parse` (with path + line context) if malformed YAML.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Options::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill in defaults and freeze the result.
    pub fn resolve(self) -> Config {
        let charset = non_empty_or(self.charset, DEFAULT_CHARSET);
        let directory = if self.directory.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_DIRECTORY)
        } else {
            self.directory
        };
        let extensions = if self.extensions.is_empty() {
            vec![DEFAULT_EXTENSION.to_string()]
        } else {
            self.extensions
        };

        Config {
            compiled_charset: format!("; charset={charset}"),
            charset,
            directory,
            layout: self.layout,
            extensions,
            html_content_type: non_empty_or(self.html_content_type, CONTENT_HTML),
            indent_json: self.indent_json,
            prefix_json: self.prefix_json.into_bytes(),
            unescape_html: self.unescape_html,
            streaming_json: self.streaming_json,
            disable_http_error_rendering: self.disable_http_error_rendering,
            buffer_pool_size: self.buffer_pool_size.unwrap_or(DEFAULT_BUFFER_POOL_SIZE),
        }
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Resolved render configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    directory: PathBuf,
    layout: String,
    extensions: Vec<String>,
    charset: String,
    compiled_charset: String,
    html_content_type: String,
    indent_json: bool,
    prefix_json: Vec<u8>,
    unescape_html: bool,
    streaming_json: bool,
    disable_http_error_rendering: bool,
    buffer_pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Options::default().resolve()
    }
}

impl Config {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// `"; charset=<charset>"`, ready to append to a content type.
    pub fn charset_suffix(&self) -> &str {
        &self.compiled_charset
    }

    /// `content_type` with the configured charset suffix appended.
    pub fn with_charset(&self, content_type: &str) -> String {
        format!("{content_type}{}", self.compiled_charset)
    }

    pub fn html_content_type(&self) -> &str {
        &self.html_content_type
    }

    pub fn indent_json(&self) -> bool {
        self.indent_json
    }

    pub fn prefix_json(&self) -> &[u8] {
        &self.prefix_json
    }

    pub fn unescape_html(&self) -> bool {
        self.unescape_html
    }

    pub fn streaming_json(&self) -> bool {
        self.streaming_json
    }

    pub fn disable_http_error_rendering(&self) -> bool {
        self.disable_http_error_rendering
    }

    pub fn buffer_pool_size(&self) -> usize {
        self.buffer_pool_size
    }
}
