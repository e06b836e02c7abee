//! # renderall-renderer
//!
//! Response renderers: raw bytes, HTML templates, JSON, and JSONP, all behind
//! one [`Engine`] capability, plus the buffer pool that stages template output.
//!
//! ## Usage
//!
//! ```rust
//! use renderall_core::{ResponseRecorder, CONTENT_JSON};
//! use renderall_renderer::{Engine, Head, Json};
//!
//! let mut rec = ResponseRecorder::new();
//! let json = Json::new(Head::new(CONTENT_JSON, 200));
//! json.render(&mut rec, &serde_json::json!({"a": 1})).unwrap();
//! assert_eq!(rec.body(), br#"{"a":1}"#);
//! ```

pub mod engine;
pub mod error;
mod finite;
pub mod json;
pub mod pool;
pub mod templates;

pub use engine::{Data, Engine, Head, Html};
pub use error::RenderError;
pub use json::{unescape_html, HtmlSafeFormatter, Json, JsonMode, Jsonp};
pub use pool::{BufferPool, PooledBuffer};
pub use templates::Templates;
