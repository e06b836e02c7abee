//! JSON and JSONP renderers.
//!
//! Encoding is HTML-safe: inside strings `<`, `>`, `&`, U+2028 and U+2029
//! are written as `\u003c`, `\u003e`, `\u0026`, `\u2028` and `\u2029`, so
//! output can be embedded in a `<script>` block. [`unescape_html`] undoes
//! the first three for clients that want them literal. NaN and infinite
//! floats are rejected with [`RenderError::Json`] in every mode.
//!
//! # Buffered vs streaming
//!
//! In [`JsonMode::Buffered`] the whole document is encoded before the head
//! is written; an encoding error leaves the response untouched.
//!
//! [`JsonMode::Streaming`] writes the head and prefix first, then encodes
//! straight onto the response. An error part-way through is still returned,
//! but the client has already received the head and a truncated body.
//! Nothing is appended to close the document. Streaming never holds the
//! full document, so it has no indent or unescape step.
//! Write failures on this path, prefix included, surface as
//! [`RenderError::Json`].

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};

use renderall_core::ResponseWriter;

use crate::engine::{write_body, Engine, Head};
use crate::error::RenderError;
use crate::finite::Finite;

// ---------------------------------------------------------------------------
// HTML-safe encoding
// ---------------------------------------------------------------------------

/// [`Formatter`] adapter that escapes HTML metacharacters inside strings.
#[derive(Debug, Clone, Default)]
pub struct HtmlSafeFormatter<F> {
    inner: F,
}

impl<F: Formatter> HtmlSafeFormatter<F> {
    pub fn new(inner: F) -> Self {
        HtmlSafeFormatter { inner }
    }
}

impl<F: Formatter> Formatter for HtmlSafeFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped: &[u8] = match ch {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            if start < i {
                writer.write_all(&bytes[start..i])?;
            }
            writer.write_all(escaped)?;
            start = i + ch.len_utf8();
        }
        if start < bytes.len() {
            writer.write_all(&bytes[start..])?;
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

/// Encode `value` into memory, optionally two-space indented.
///
/// NaN and infinite floats are an error rather than `null`.
pub fn to_vec<V: Serialize + ?Sized>(value: &V, indent: bool) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(128);
    if indent {
        let formatter = HtmlSafeFormatter::new(PrettyFormatter::with_indent(b"  "));
        Finite(value).serialize(&mut Serializer::with_formatter(&mut out, formatter))?;
    } else {
        let formatter = HtmlSafeFormatter::new(CompactFormatter);
        Finite(value).serialize(&mut Serializer::with_formatter(&mut out, formatter))?;
    }
    Ok(out)
}

/// Replace `\u003c`, `\u003e` and `\u0026` with `<`, `>` and `&`.
///
/// No other byte sequence is touched.
pub fn unescape_html(input: &[u8]) -> Vec<u8> {
    const LEAD: &[u8] = b"\\u00";

    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i..].starts_with(LEAD) && i + 6 <= input.len() {
            let literal = match &input[i + 4..i + 6] {
                b"3c" => Some(b'<'),
                b"3e" => Some(b'>'),
                b"26" => Some(b'&'),
                _ => None,
            };
            if let Some(byte) = literal {
                out.push(byte);
                i += 6;
                continue;
            }
        }
        out.push(input[i]);
        i += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Json
// ---------------------------------------------------------------------------

/// How a [`Json`] renderer produces its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonMode {
    /// Encode fully, post-process, then write.
    Buffered { indent: bool, unescape_html: bool },
    /// Encode directly onto the response.
    Streaming,
}

impl Default for JsonMode {
    fn default() -> Self {
        JsonMode::Buffered {
            indent: false,
            unescape_html: false,
        }
    }
}

/// JSON document renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json {
    pub head: Head,
    /// Written before the document, e.g. `)]}',\n` to defeat JSON hijacking.
    pub prefix: Vec<u8>,
    pub mode: JsonMode,
}

impl Json {
    pub fn new(head: Head) -> Self {
        Json {
            head,
            prefix: Vec::new(),
            mode: JsonMode::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<Vec<u8>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_mode(mut self, mode: JsonMode) -> Self {
        self.mode = mode;
        self
    }

    fn render_streaming<V: Serialize + ?Sized>(
        &self,
        w: &mut dyn ResponseWriter,
        value: &V,
    ) -> Result<(), RenderError> {
        self.head.write(w);
        w.write_all(&self.prefix).map_err(serde_json::Error::io)?;

        let mut ser = Serializer::with_formatter(&mut *w, HtmlSafeFormatter::new(CompactFormatter));
        Finite(value).serialize(&mut ser)?;
        w.write_all(b"\n").map_err(serde_json::Error::io)?;
        Ok(())
    }
}

impl<V: Serialize + ?Sized> Engine<V> for Json {
    fn render(&self, w: &mut dyn ResponseWriter, value: &V) -> Result<(), RenderError> {
        let (indent, unescape) = match self.mode {
            JsonMode::Streaming => return self.render_streaming(w, value),
            JsonMode::Buffered {
                indent,
                unescape_html,
            } => (indent, unescape_html),
        };

        let mut result = to_vec(value, indent)?;
        if indent {
            result.push(b'\n');
        }
        if unescape {
            result = unescape_html(&result);
        }

        self.head.write(w);
        write_body(w, &self.prefix);
        write_body(w, &result);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Jsonp
// ---------------------------------------------------------------------------

/// JSONP renderer: `<callback>(<json>);`, plus `\n` when indented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jsonp {
    pub head: Head,
    pub indent: bool,
    pub callback: String,
}

impl Jsonp {
    pub fn new(head: Head, callback: impl Into<String>) -> Self {
        Jsonp {
            head,
            indent: false,
            callback: callback.into(),
        }
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }
}

impl<V: Serialize + ?Sized> Engine<V> for Jsonp {
    fn render(&self, w: &mut dyn ResponseWriter, value: &V) -> Result<(), RenderError> {
        let result = to_vec(value, self.indent)?;

        self.head.write(w);
        write_body(w, self.callback.as_bytes());
        write_body(w, b"(");
        write_body(w, &result);
        write_body(w, b");");
        if self.indent {
            write_body(w, b"\n");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
