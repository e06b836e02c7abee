use std::sync::Arc;

use renderall_core::{
    Options, ResponseRecorder, ResponseWriter, CONTENT_BINARY, CONTENT_TYPE, STATUS_CREATED,
    STATUS_INTERNAL_SERVER_ERROR,
};
use renderall_dispatch::Render;
use renderall_renderer::{Engine, RenderError, Templates};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::json;

/// Custom engine that always fails before writing anything.
struct Failing;

impl Engine<str> for Failing {
    fn render(&self, _w: &mut dyn ResponseWriter, _value: &str) -> Result<(), RenderError> {
        Err(RenderError::Other("backend exploded".into()))
    }
}

/// Custom engine that reads its body from disk and propagates the I/O error.
struct FromFile;

impl Engine<std::path::Path> for FromFile {
    fn render(
        &self,
        w: &mut dyn ResponseWriter,
        path: &std::path::Path,
    ) -> Result<(), RenderError> {
        let body = std::fs::read(path)?;
        w.write_head(200);
        w.write_all(&body)?;
        Ok(())
    }
}

/// Serializes as a number, or fails with "boom".
enum Item {
    Num(u32),
    Boom,
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Item::Num(n) => s.serialize_u32(*n),
            Item::Boom => Err(S::Error::custom("boom")),
        }
    }
}

fn disabled() -> Options {
    Options {
        disable_http_error_rendering: true,
        ..Options::default()
    }
}

// ---------------------------------------------------------------------------
// 1. Dispatcher fallback policy
// ---------------------------------------------------------------------------

#[test]
fn failing_engine_yields_500_with_message() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();

    let err = render.render(&mut rec, &Failing, "ignored").unwrap_err();

    assert_eq!(err.to_string(), "backend exploded");
    assert_eq!(rec.status(), Some(STATUS_INTERNAL_SERVER_ERROR));
    assert_eq!(rec.body_string(), "backend exploded");
    assert_eq!(
        rec.headers().get(CONTENT_TYPE),
        Some("text/plain; charset=utf-8")
    );
}

#[test]
fn disabled_fallback_writes_nothing_but_still_errors() {
    let render = Render::new(disabled());
    let mut rec = ResponseRecorder::new();

    let err = render.render(&mut rec, &Failing, "ignored").unwrap_err();

    assert!(matches!(err, RenderError::Other(_)));
    assert_eq!(rec.head_writes(), 0);
    assert!(rec.headers().is_empty());
    assert!(rec.body().is_empty());
}

#[test]
fn json_encoding_failure_becomes_500() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();

    let err = render.json(&mut rec, 200, &Item::Boom).unwrap_err();

    assert_eq!(rec.status(), Some(STATUS_INTERNAL_SERVER_ERROR));
    assert_eq!(rec.body_string(), err.to_string());
    assert_eq!(rec.head_writes(), 1);
}

#[test]
fn custom_engine_io_error_becomes_500() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();

    let err = render
        .render(&mut rec, &FromFile, std::path::Path::new("/nonexistent/renderall/body.bin"))
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)), "got: {err}");
    assert_eq!(rec.status(), Some(STATUS_INTERNAL_SERVER_ERROR));
    assert_eq!(rec.body_string(), err.to_string());
}

#[test]
fn json_nan_becomes_500_instead_of_null() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();

    let err = render.json(&mut rec, 200, &[1.0, f64::NAN]).unwrap_err();

    assert!(matches!(err, RenderError::Json(_)), "got: {err}");
    assert_eq!(rec.status(), Some(STATUS_INTERNAL_SERVER_ERROR));
    assert!(!rec.body_string().contains("null"));
}

#[test]
fn streaming_failure_after_head_gets_no_fallback() {
    let render = Render::new(Options {
        streaming_json: true,
        ..Options::default()
    });
    let mut rec = ResponseRecorder::new();

    let err = render
        .json(&mut rec, 200, &vec![Item::Num(7), Item::Boom])
        .unwrap_err();

    assert!(err.to_string().contains("boom"));
    assert_eq!(rec.status(), Some(200), "original head stands");
    assert_eq!(rec.head_writes(), 1, "no second head for the fallback");
    assert_eq!(rec.body_string(), "[7,");
}

// ---------------------------------------------------------------------------
// 2. Builders copy configuration into renderers
// ---------------------------------------------------------------------------

#[test]
fn json_builder_applies_charset_prefix_indent() {
    let render = Render::new(Options {
        charset: "ISO-8859-1".into(),
        prefix_json: ")]}',\n".into(),
        indent_json: true,
        ..Options::default()
    });
    let mut rec = ResponseRecorder::new();
    render.json(&mut rec, STATUS_CREATED, &json!({"a": 1})).unwrap();

    assert_eq!(rec.status(), Some(STATUS_CREATED));
    assert_eq!(
        rec.headers().get(CONTENT_TYPE),
        Some("application/json; charset=ISO-8859-1")
    );
    assert_eq!(rec.body_string(), ")]}',\n{\n  \"a\": 1\n}\n");
}

#[test]
fn json_builder_unescapes_when_configured() {
    let render = Render::new(Options {
        unescape_html: true,
        ..Options::default()
    });
    let mut rec = ResponseRecorder::new();
    render.json(&mut rec, 200, &json!({"q": "a<b&c>d"})).unwrap();
    assert_eq!(rec.body_string(), r#"{"q":"a<b&c>d"}"#);
}

#[test]
fn streaming_builder_ignores_unescape() {
    let render = Render::new(Options {
        streaming_json: true,
        unescape_html: true,
        indent_json: true,
        ..Options::default()
    });
    let mut rec = ResponseRecorder::new();
    render.json(&mut rec, 200, &json!({"q": "<"})).unwrap();
    assert_eq!(rec.body_string(), "{\"q\":\"\\u003c\"}\n");
}

#[test]
fn jsonp_builder_wraps_callback() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();
    render.jsonp(&mut rec, 200, "cb", &json!({"a": 1})).unwrap();

    assert_eq!(rec.body_string(), r#"cb({"a":1});"#);
    assert_eq!(
        rec.headers().get(CONTENT_TYPE),
        Some("application/javascript; charset=UTF-8")
    );
}

#[test]
fn jsonp_builder_indents_and_appends_newline() {
    let render = Render::new(Options {
        indent_json: true,
        ..Options::default()
    });
    let mut rec = ResponseRecorder::new();
    render.jsonp(&mut rec, 200, "cb", &json!({"a": 1})).unwrap();
    assert!(rec.body_string().ends_with(");\n"));
}

#[test]
fn data_builder_has_no_charset_suffix() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();
    render.data(&mut rec, STATUS_CREATED, b"hello").unwrap();

    assert_eq!(rec.status(), Some(STATUS_CREATED));
    assert_eq!(rec.headers().get(CONTENT_TYPE), Some(CONTENT_BINARY));
    assert_eq!(rec.body(), b"hello");
}

#[test]
fn data_builder_keeps_caller_content_type() {
    let render = Render::default();
    let mut rec = ResponseRecorder::new();
    rec.headers_mut().set(CONTENT_TYPE, "application/pdf");
    render.data(&mut rec, 200, b"%PDF").unwrap();
    assert_eq!(rec.headers().get(CONTENT_TYPE), Some("application/pdf"));
}

// ---------------------------------------------------------------------------
// 3. HTML
// ---------------------------------------------------------------------------

fn page_templates() -> Templates {
    Templates::from_raw([
        ("page.html", "<title>{{ title }}</title>"),
        ("broken.html", "{{ nothing.here }}"),
    ])
    .expect("compile")
}

#[test]
fn html_builder_uses_configured_content_type() {
    let render = Render::new(Options {
        html_content_type: "application/xhtml+xml".into(),
        ..Options::default()
    })
    .with_templates(page_templates());
    let mut rec = ResponseRecorder::new();
    render
        .html(&mut rec, 200, "page.html", &json!({"title": "Home"}))
        .unwrap();

    assert_eq!(rec.body_string(), "<title>Home</title>");
    assert_eq!(
        rec.headers().get(CONTENT_TYPE),
        Some("application/xhtml+xml; charset=UTF-8")
    );
}

#[test]
fn html_template_failure_becomes_500_and_releases_buffer() {
    let render = Render::default().with_templates(page_templates());
    let mut rec = ResponseRecorder::new();

    let err = render.html(&mut rec, 200, "broken.html", &json!({})).unwrap_err();

    assert!(matches!(err, RenderError::Template(_)));
    assert_eq!(rec.status(), Some(STATUS_INTERNAL_SERVER_ERROR));
    assert_eq!(rec.head_writes(), 1, "only the fallback head is written");
    assert_eq!(render.pool().idle(), 1);
}

#[test]
fn html_without_templates_is_an_error() {
    let render = Render::new(disabled());
    let mut rec = ResponseRecorder::new();

    let err = render.html(&mut rec, 200, "page.html", &json!({})).unwrap_err();

    assert!(matches!(err, RenderError::MissingTemplates { ref name } if name == "page.html"));
    assert!(!rec.head_written());
}

#[test]
fn concurrent_html_renders_share_one_pool() {
    let render = Arc::new(
        Render::new(Options {
            buffer_pool_size: Some(2),
            ..Options::default()
        })
        .with_templates(page_templates()),
    );

    std::thread::scope(|s| {
        for id in 0..8 {
            let render = Arc::clone(&render);
            s.spawn(move || {
                for round in 0..50 {
                    let title = format!("t{id}-{round}");
                    let mut rec = ResponseRecorder::new();
                    render
                        .html(&mut rec, 200, "page.html", &json!({ "title": title }))
                        .expect("render");
                    assert_eq!(rec.body_string(), format!("<title>{title}</title>"));
                }
            });
        }
    });

    assert!(render.pool().idle() <= 2);
}
