//! The transport seam every renderer writes through.
//!
//! A [`ResponseWriter`] is a header map, a one-shot status write, and a byte
//! sink for the body. Two implementations ship with the crate:
//!
//! - [`ResponseRecorder`] keeps everything in memory (tests, previews).
//! - [`WireWriter`] serialises an HTTP/1.1 head onto any [`io::Write`] and
//!   passes body bytes straight through.
//!
//! Both follow the same rules: the first `write_head` wins, later calls are
//! logged and ignored, and a body write before any `write_head` implies
//! status 200.

use std::io::{self, Write};

use crate::types::{reason_phrase, Headers, STATUS_OK};

/// Outbound response target.
pub trait ResponseWriter: Write {
    /// Headers that will be sent with the next `write_head`.
    fn headers(&self) -> &Headers;

    fn headers_mut(&mut self) -> &mut Headers;

    /// Send the status and the current headers. Only the first call has an effect.
    fn write_head(&mut self, status: u16);

    /// Whether the status line and headers have already gone out.
    fn head_written(&self) -> bool;
}

// ---------------------------------------------------------------------------
// ResponseRecorder
// ---------------------------------------------------------------------------

/// In-memory [`ResponseWriter`].
#[derive(Debug, Default, Clone)]
pub struct ResponseRecorder {
    headers: Headers,
    sent_headers: Option<Headers>,
    status: Option<u16>,
    head_writes: usize,
    body: Vec<u8>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status sent by the first `write_head`, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Header snapshot taken when the head was written.
    pub fn sent_headers(&self) -> Option<&Headers> {
        self.sent_headers.as_ref()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8, lossily decoded.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Number of `write_head` calls, superfluous ones included.
    pub fn head_writes(&self) -> usize {
        self.head_writes
    }
}

impl ResponseWriter for ResponseRecorder {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    fn write_head(&mut self, status: u16) {
        self.head_writes += 1;
        if let Some(sent) = self.status {
            tracing::warn!(sent, ignored = status, "superfluous write_head call");
            return;
        }
        self.status = Some(status);
        self.sent_headers = Some(self.headers.clone());
    }

    fn head_written(&self) -> bool {
        self.status.is_some()
    }
}

impl Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.write_head(STATUS_OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// [`ResponseWriter`] that emits an HTTP/1.1 response onto a byte sink.
///
/// The body is written as-is with no framing; callers wanting keep-alive
/// must set `Content-Length` themselves.
#[derive(Debug)]
pub struct WireWriter<W: Write> {
    inner: W,
    headers: Headers,
    status: Option<u16>,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            headers: Headers::new(),
            status: None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ResponseWriter for WireWriter<W> {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    fn write_head(&mut self, status: u16) {
        if let Some(sent) = self.status {
            tracing::warn!(sent, ignored = status, "superfluous write_head call");
            return;
        }
        self.status = Some(status);
        let head = format!(
            "HTTP/1.1 {status} {}\r\n{}\r\n",
            reason_phrase(status),
            self.headers
        );
        // Header writes are best-effort; a dead peer surfaces on the body write.
        if let Err(err) = self.inner.write_all(head.as_bytes()) {
            tracing::warn!(error = %err, status, "failed to write response head");
        }
    }

    fn head_written(&self) -> bool {
        self.status.is_some()
    }
}

impl<W: Write> Write for WireWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.write_head(STATUS_OK);
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
