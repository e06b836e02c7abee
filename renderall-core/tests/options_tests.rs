//! Options loading, error-message, and resolution integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use renderall_core::{ConfigError, Options, CONTENT_HTML, CONTENT_XHTML};
use rstest::rstest;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_file_returns_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("render.yaml");
    let err = Options::load_at(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("options file not found"));
    assert!(err.to_string().contains("render.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("render.yaml");
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = Options::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("render.yaml"), "must contain file path, got: {msg}");
    let source_msg = match &err {
        ConfigError::Parse { source, .. } => source.to_string(),
        _ => unreachable!(),
    };
    assert!(!source_msg.is_empty(), "serde_yaml must provide error context");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("render.yaml");
    file.write_str("indent_json: \"very\"\n").expect("write");

    let err = Options::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn load_directory_returns_io_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("render.yaml").create_dir_all().expect("mkdir");
    dir.child("render.yaml").assert(predicate::path::is_dir());

    let err = Options::load_at(&dir.path().join("render.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Load + resolve
// ---------------------------------------------------------------------------

#[test]
fn full_file_resolves_every_field() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("render.yaml");
    file.write_str(
        r#"
directory: views
layout: base
extensions: [".html", ".tera"]
charset: ISO-8859-1
indent_json: true
prefix_json: ")]}',"
html_content_type: application/xhtml+xml
unescape_html: true
streaming_json: true
disable_http_error_rendering: true
buffer_pool_size: 8
"#,
    )
    .expect("write");

    let cfg = Options::load_at(file.path()).expect("load").resolve();
    assert_eq!(cfg.directory(), std::path::Path::new("views"));
    assert_eq!(cfg.layout(), "base");
    assert_eq!(cfg.extensions(), &[".html".to_string(), ".tera".to_string()]);
    assert_eq!(cfg.charset_suffix(), "; charset=ISO-8859-1");
    assert!(cfg.indent_json());
    assert_eq!(cfg.prefix_json(), b")]}',");
    assert_eq!(cfg.html_content_type(), CONTENT_XHTML);
    assert!(cfg.unescape_html());
    assert!(cfg.streaming_json());
    assert!(cfg.disable_http_error_rendering());
    assert_eq!(cfg.buffer_pool_size(), 8);
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("{}\n")]
fn empty_file_resolves_to_defaults(#[case] contents: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("render.yaml");
    file.write_str(contents).expect("write");

    let cfg = Options::load_at(file.path()).expect("load").resolve();
    assert_eq!(cfg, Options::default().resolve());
    assert_eq!(cfg.html_content_type(), CONTENT_HTML);
}

#[rstest]
#[case("", "; charset=UTF-8")]
#[case("utf-16", "; charset=utf-16")]
#[case("ISO-8859-1", "; charset=ISO-8859-1")]
fn charset_suffix_cases(#[case] charset: &str, #[case] expected: &str) {
    let cfg = Options {
        charset: charset.to_string(),
        ..Options::default()
    }
    .resolve();
    assert_eq!(cfg.charset_suffix(), expected);
}

#[test]
fn config_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<renderall_core::Config>();
}
