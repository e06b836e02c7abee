//! renderall core: wire constants, the response seam, and render options.
//!
//! Public API surface:
//! - [`types`]: content types, status codes, [`Headers`]
//! - [`response`]: [`ResponseWriter`], [`ResponseRecorder`], [`WireWriter`]
//! - [`options`]: [`Options`] → [`Config`]
//! - [`error`]: [`ConfigError`]

pub mod error;
pub mod options;
pub mod response;
pub mod types;

pub use error::ConfigError;
pub use options::{Config, Options, DEFAULT_BUFFER_POOL_SIZE};
pub use response::{ResponseRecorder, ResponseWriter, WireWriter};
pub use types::{
    reason_phrase, Headers, CONTENT_BINARY, CONTENT_HTML, CONTENT_JSON, CONTENT_JSONP,
    CONTENT_LENGTH, CONTENT_TEXT, CONTENT_TYPE, CONTENT_TYPE_OPTIONS, CONTENT_XHTML,
    DEFAULT_CHARSET, STATUS_CREATED, STATUS_INTERNAL_SERVER_ERROR, STATUS_OK,
};
