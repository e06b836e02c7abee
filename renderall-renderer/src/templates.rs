//! Compiled template set handed to the HTML renderer.
//!
//! Discovery and loading of template files is the caller's job; this type
//! only wraps an already-compiled [`Tera`] instance and executes templates
//! by name into a byte sink.

use std::io::Write;

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::RenderError;

/// Named, pre-compiled templates.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Wrap an existing [`Tera`] instance.
    pub fn new(tera: Tera) -> Self {
        Templates { tera }
    }

    /// Compile `(name, source)` pairs into a template set.
    ///
    /// All templates are added in one batch so inheritance and includes
    /// between them resolve regardless of order.
    pub fn from_raw<I, N, S>(templates: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut tera = Tera::default();
        let items: Vec<(String, String)> = templates
            .into_iter()
            .map(|(name, source)| (name.as_ref().to_string(), source.as_ref().to_string()))
            .collect();
        tera.add_raw_templates(items)?;
        Ok(Templates { tera })
    }

    /// Whether a template called `name` exists.
    pub fn has(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Template names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Execute `name` with `binding` into `out`.
    ///
    /// `binding` must serialize to a map; anything else is a template error.
    /// On error, `out` may hold partial output and must be discarded.
    pub fn execute<T, W>(&self, name: &str, binding: &T, out: W) -> Result<(), RenderError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let ctx = Context::from_serialize(binding)?;
        self.tera.render_to(name, &ctx, out)?;
        Ok(())
    }

    pub fn as_tera(&self) -> &Tera {
        &self.tera
    }
}

impl From<Tera> for Templates {
    fn from(tera: Tera) -> Self {
        Templates::new(tera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set() -> Templates {
        Templates::from_raw([
            ("base.html", "<h1>{% block title %}{% endblock %}</h1>"),
            ("page.html", "{% extends \"base.html\" %}{% block title %}{{ title }}{% endblock %}"),
        ])
        .expect("compile")
    }

    #[test]
    fn inheritance_resolves_across_batch() {
        let mut out = Vec::new();
        set().execute("page.html", &json!({"title": "Hi"}), &mut out).unwrap();
        assert_eq!(out, b"<h1>Hi</h1>");
    }

    #[test]
    fn names_and_has() {
        let t = set();
        assert!(t.has("page.html"));
        assert!(!t.has("missing.html"));
        assert_eq!(t.names(), vec!["base.html", "page.html"]);
    }

    #[test]
    fn wrapped_tera_is_reachable() {
        let tera = Tera::default();
        let t = Templates::from(tera);
        assert_eq!(t.as_tera().get_template_names().count(), 0);
        assert!(set().as_tera().get_template("base.html").is_ok());
    }

    #[test]
    fn unknown_template_is_an_error() {
        let mut out = Vec::new();
        let err = set().execute("nope.html", &json!({}), &mut out).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)), "got: {err}");
    }

    #[test]
    fn non_map_binding_is_an_error() {
        let mut out = Vec::new();
        let err = set().execute("page.html", &vec![1, 2, 3], &mut out).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)), "got: {err}");
    }

    #[test]
    fn invalid_source_fails_to_compile() {
        let err = Templates::from_raw([("bad.html", "{% if %}")]).unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }
}
