//! The [`Engine`] capability, the shared [`Head`] writer, and the raw-data
//! and template renderers.
//!
//! Every renderer follows one ordering rule: nothing reaches the response
//! before [`Head::write`], and `Head::write` happens once. Renderers that
//! can fail (template execution, JSON encoding) do the failing work first
//! and only then write the head, so a failure leaves the response untouched.
//! Streaming JSON is the one documented exception; see [`crate::json`].

use serde::Serialize;

use renderall_core::{ResponseWriter, CONTENT_TYPE};

use crate::error::RenderError;
use crate::pool::BufferPool;
use crate::templates::Templates;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A response format. `V` is the value type the format accepts.
pub trait Engine<V: ?Sized> {
    /// Write headers and the encoded `value` to `w`.
    fn render(&self, w: &mut dyn ResponseWriter, value: &V) -> Result<(), RenderError>;
}

impl<V: ?Sized, E: Engine<V> + ?Sized> Engine<V> for &E {
    fn render(&self, w: &mut dyn ResponseWriter, value: &V) -> Result<(), RenderError> {
        (**self).render(w, value)
    }
}

// ---------------------------------------------------------------------------
// Head
// ---------------------------------------------------------------------------

/// Content type and status for a single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub content_type: String,
    pub status: u16,
}

impl Head {
    pub fn new(content_type: impl Into<String>, status: u16) -> Self {
        Head {
            content_type: content_type.into(),
            status,
        }
    }

    /// Set `Content-Type` and send the status.
    pub fn write(&self, w: &mut dyn ResponseWriter) {
        w.headers_mut().set(CONTENT_TYPE, self.content_type.as_str());
        w.write_head(self.status);
    }
}

/// Body writes are best-effort: transport failures are logged, not returned.
pub(crate) fn write_body(w: &mut dyn ResponseWriter, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    if let Err(err) = w.write_all(bytes) {
        tracing::debug!(error = %err, len = bytes.len(), "response body write failed");
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// Raw bytes, written verbatim.
///
/// A `Content-Type` already present on the response overrides
/// `head.content_type`: the caller's header wins over the renderer default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub head: Head,
}

impl Data {
    pub fn new(head: Head) -> Self {
        Data { head }
    }
}

impl Engine<[u8]> for Data {
    fn render(&self, w: &mut dyn ResponseWriter, value: &[u8]) -> Result<(), RenderError> {
        let mut head = self.head.clone();
        if let Some(preset) = w.headers().get(CONTENT_TYPE).filter(|c| !c.is_empty()) {
            head.content_type = preset.to_string();
        }

        head.write(w);
        write_body(w, value);
        Ok(())
    }
}

impl Engine<Vec<u8>> for Data {
    fn render(&self, w: &mut dyn ResponseWriter, value: &Vec<u8>) -> Result<(), RenderError> {
        Engine::<[u8]>::render(self, w, value.as_slice())
    }
}

// ---------------------------------------------------------------------------
// Html
// ---------------------------------------------------------------------------

/// Named template executed against a binding, staged in a pooled buffer.
///
/// The template runs into a buffer from `pool`, never into the response, so
/// an execution error is reported with no header or byte sent. The buffer is
/// released on every path.
#[derive(Debug, Clone)]
pub struct Html<'a> {
    pub head: Head,
    pub name: String,
    pub templates: &'a Templates,
    pub pool: &'a BufferPool,
}

impl<'a> Html<'a> {
    pub fn new(
        head: Head,
        name: impl Into<String>,
        templates: &'a Templates,
        pool: &'a BufferPool,
    ) -> Self {
        Html {
            head,
            name: name.into(),
            templates,
            pool,
        }
    }
}

impl<V: Serialize + ?Sized> Engine<V> for Html<'_> {
    fn render(&self, w: &mut dyn ResponseWriter, binding: &V) -> Result<(), RenderError> {
        let mut out = self.pool.acquire();
        self.templates.execute(&self.name, binding, &mut out)?;

        self.head.write(w);
        write_body(w, &out);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
