//! The render service: dispatcher plus per-format builders.
//!
//! [`Render`] owns the resolved [`Config`], the template [`BufferPool`], and
//! an optional [`Templates`] set. It is `Send + Sync`; share one instance
//! (e.g. behind an `Arc`) across request handlers.
//!
//! ## Failure policy
//!
//! Every builder funnels into [`Render::render`]. When a renderer fails:
//!
//! 1. If automatic error rendering is enabled and the response head has not
//!    gone out yet, a plain-text 500 carrying the error message is written.
//! 2. If the head was already sent (streaming JSON that failed mid-document),
//!    no fallback is attempted: the client keeps the truncated response and
//!    the failure is logged.
//! 3. The original error is always returned to the caller.

use serde::Serialize;

use renderall_core::{
    Config, Options, ResponseWriter, CONTENT_BINARY, CONTENT_JSON, CONTENT_JSONP, CONTENT_LENGTH,
    CONTENT_TYPE, CONTENT_TYPE_OPTIONS, STATUS_INTERNAL_SERVER_ERROR,
};
use renderall_renderer::{
    BufferPool, Data, Engine, Head, Html, Json, JsonMode, Jsonp, RenderError, Templates,
};

/// Content type of the automatic error response.
const ERROR_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Response rendering service.
#[derive(Debug)]
pub struct Render {
    config: Config,
    pool: BufferPool,
    templates: Option<Templates>,
}

impl Default for Render {
    fn default() -> Self {
        Render::with_config(Config::default())
    }
}

impl Render {
    /// Resolve `options` and build a service around them.
    pub fn new(options: Options) -> Self {
        Render::with_config(options.resolve())
    }

    /// Build a service around an already-resolved [`Config`].
    pub fn with_config(config: Config) -> Self {
        let pool = BufferPool::new(config.buffer_pool_size());
        Render {
            config,
            pool,
            templates: None,
        }
    }

    /// Attach the template set used by [`Render::html`].
    pub fn with_templates(mut self, templates: Templates) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn templates(&self) -> Option<&Templates> {
        self.templates.as_ref()
    }

    // -----------------------------------------------------------------------
    // Dispatcher
    // -----------------------------------------------------------------------

    /// Run `engine` against `value`, applying the failure policy above.
    ///
    /// Works with the built-in renderers and with any custom [`Engine`].
    pub fn render<V, E>(
        &self,
        w: &mut dyn ResponseWriter,
        engine: &E,
        value: &V,
    ) -> Result<(), RenderError>
    where
        V: ?Sized,
        E: Engine<V> + ?Sized,
    {
        let result = engine.render(w, value);
        if let Err(err) = &result {
            self.handle_failure(w, err);
        }
        result
    }

    fn handle_failure(&self, w: &mut dyn ResponseWriter, err: &RenderError) {
        if self.config.disable_http_error_rendering() {
            tracing::debug!(error = %err, "render failed; automatic error response disabled");
            return;
        }
        if w.head_written() {
            tracing::error!(
                error = %err,
                "render failed after the response head was sent; response is truncated"
            );
            return;
        }
        tracing::warn!(error = %err, "render failed; writing 500 response");
        http_error(w, &err.to_string(), STATUS_INTERNAL_SERVER_ERROR);
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Write raw bytes as `application/octet-stream` (or the content type
    /// already set on `w`).
    pub fn data(
        &self,
        w: &mut dyn ResponseWriter,
        status: u16,
        value: &[u8],
    ) -> Result<(), RenderError> {
        let data = Data::new(Head::new(CONTENT_BINARY, status));
        self.render(w, &data, value)
    }

    /// Encode `value` as a JSON response.
    pub fn json<V: Serialize + ?Sized>(
        &self,
        w: &mut dyn ResponseWriter,
        status: u16,
        value: &V,
    ) -> Result<(), RenderError> {
        let head = Head::new(self.config.with_charset(CONTENT_JSON), status);
        let mode = if self.config.streaming_json() {
            JsonMode::Streaming
        } else {
            JsonMode::Buffered {
                indent: self.config.indent_json(),
                unescape_html: self.config.unescape_html(),
            }
        };
        let json = Json::new(head)
            .with_prefix(self.config.prefix_json())
            .with_mode(mode);
        self.render(w, &json, value)
    }

    /// Encode `value` as JSONP wrapped in `callback(...)`.
    pub fn jsonp<V: Serialize + ?Sized>(
        &self,
        w: &mut dyn ResponseWriter,
        status: u16,
        callback: &str,
        value: &V,
    ) -> Result<(), RenderError> {
        let head = Head::new(self.config.with_charset(CONTENT_JSONP), status);
        let jsonp = Jsonp::new(head, callback).with_indent(self.config.indent_json());
        self.render(w, &jsonp, value)
    }

    /// Execute the template `name` with `binding` as an HTML response.
    ///
    /// Fails with [`RenderError::MissingTemplates`] when no template set is
    /// attached.
    pub fn html<V: Serialize + ?Sized>(
        &self,
        w: &mut dyn ResponseWriter,
        status: u16,
        name: &str,
        binding: &V,
    ) -> Result<(), RenderError> {
        let Some(templates) = self.templates.as_ref() else {
            let err = RenderError::MissingTemplates {
                name: name.to_string(),
            };
            self.handle_failure(w, &err);
            return Err(err);
        };

        let head = Head::new(self.config.with_charset(self.config.html_content_type()), status);
        let html = Html::new(head, name, templates, &self.pool);
        self.render(w, &html, binding)
    }
}

/// Plain-text error response: `message` as the body under `status`.
pub fn http_error(w: &mut dyn ResponseWriter, message: &str, status: u16) {
    let headers = w.headers_mut();
    headers.remove(CONTENT_LENGTH);
    headers.set(CONTENT_TYPE, ERROR_CONTENT_TYPE);
    headers.set(CONTENT_TYPE_OPTIONS, "nosniff");
    w.write_head(status);
    if let Err(err) = w.write_all(message.as_bytes()) {
        tracing::debug!(error = %err, "error response body write failed");
    }
}
