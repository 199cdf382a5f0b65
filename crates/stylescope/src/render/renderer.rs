//! Page renderer that emits the aggregated stylesheet last.

use std::path::Path;

use minijinja::{AutoEscape, Environment, Error, Value};
use serde::Serialize;

use super::functions::{register_functions, STYLESHEET_MARKER};
use super::object::BindingObject;
use crate::binding::StyleBinding;
use crate::registry::Registry;

/// A MiniJinja renderer wired to one [`Registry`].
///
/// Templates mint bindings with `scope(...)`, apply them with the
/// `scoped_css` filter or `binding.css(...)`, and place `{{ stylesheet() }}`
/// wherever the aggregated styles belong, typically inside `<head>`. The
/// stylesheet is filled in only after the whole template has rendered, so
/// deferred bindings invoked further down the page are included.
///
/// Auto-escaping is off by default, whatever the template name. Style text
/// interpolated inside a `scoped_css` block must reach the stylesheet
/// verbatim, since browsers do not decode entities inside `<style>`. Call
/// [`set_html_escape`](Self::set_html_escape) to restore escaping for
/// `.html` templates.
///
/// # Example
///
/// ```rust
/// use stylescope::{PageRenderer, Registry};
///
/// let mut renderer = PageRenderer::new(Registry::default());
/// renderer.add_template("page", r#"<style>{{ stylesheet() }}</style>
/// {% set card = scope("card", defer=true) -%}
/// <div id="{{ card.id }}">
///   {%- filter scoped_css(card) %}## { padding: 4px; }{% endfilter -%}
/// </div>"#).unwrap();
///
/// let html = renderer.render("page", &()).unwrap();
/// assert!(html.starts_with("<style>#card { padding: 4px; }</style>"));
/// assert!(html.contains(r#"<div id="card"></div>"#));
/// ```
pub struct PageRenderer {
    env: Environment<'static>,
    registry: Registry,
}

impl PageRenderer {
    /// Creates a renderer whose templates mint bindings from `registry`.
    pub fn new(registry: Registry) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_functions(&mut env, registry.clone());
        Self { env, registry }
    }

    /// Creates a renderer that loads templates by name from `dir`.
    pub fn with_template_dir(registry: Registry, dir: impl AsRef<Path>) -> Self {
        let mut renderer = Self::new(registry);
        renderer
            .env
            .set_loader(minijinja::path_loader(dir.as_ref()));
        renderer
    }

    /// Turns HTML auto-escaping on or off for templates named `*.html`,
    /// `*.htm` and `*.xml`.
    ///
    /// With escaping on, values interpolated inside a `scoped_css` block are
    /// entity-escaped before the binding sees them. Pass them through the
    /// `.css(...)` method, or mark them `|safe`, instead.
    pub fn set_html_escape(&mut self, enabled: bool) {
        if enabled {
            self.env
                .set_auto_escape_callback(minijinja::default_auto_escape_callback);
        } else {
            self.env.set_auto_escape_callback(|_| AutoEscape::None);
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Exposes a binding to every template under `name`.
    ///
    /// Use this for bindings shared across component instances, such as a
    /// memoized binding whose style block is the same for every instance.
    pub fn add_binding(&mut self, name: &str, binding: StyleBinding) {
        self.env
            .add_global(name.to_string(), Value::from_object(BindingObject::new(binding)));
    }

    /// Renders a registered template and fills in the stylesheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        let output = tmpl.render(data)?;
        Ok(self.finish(output))
    }

    /// Renders a one-off template source and fills in the stylesheet.
    pub fn render_str<T: Serialize>(&self, source: &str, data: &T) -> Result<String, Error> {
        let output = self.env.render_str(source, data)?;
        Ok(self.finish(output))
    }

    fn finish(&self, output: String) -> String {
        if !output.contains(STYLESHEET_MARKER) {
            return output;
        }
        output.replace(STYLESHEET_MARKER, &self.registry.all_css())
    }
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingOptions;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Card {
        color: String,
    }

    #[test]
    fn test_immediate_binding_renders_inline() {
        let mut renderer = PageRenderer::new(Registry::default());
        renderer
            .add_template(
                "card",
                r###"{% set c = scope("card") %}<style>{{ c.css("## { color: " ~ color ~ "; }") }}</style>"###,
            )
            .unwrap();

        let out = renderer
            .render("card", &Card { color: "red".into() })
            .unwrap();
        assert_eq!(out, "<style>#card { color: red; }</style>");
    }

    #[test]
    fn test_each_render_mints_new_ids() {
        let mut renderer = PageRenderer::new(Registry::default());
        renderer
            .add_template("id", r#"{{ scope("circle").id }}"#)
            .unwrap();

        assert_eq!(renderer.render("id", &()).unwrap(), "circle");
        assert_eq!(renderer.render("id", &()).unwrap(), "circle__2");
    }

    #[test]
    fn test_stylesheet_collects_bindings_rendered_after_it() {
        let mut renderer = PageRenderer::new(Registry::default());
        renderer
            .add_template(
                "page",
                concat!(
                    "<head>{{ stylesheet() }}</head>",
                    "{% for color in colors %}",
                    "{% set c = scope(\"circle\", defer=true) %}",
                    "<i id=\"{{ c.id }}\">",
                    "{% filter scoped_css(c) %}## { color: {{ color }}; }{% endfilter %}",
                    "</i>",
                    "{% endfor %}"
                ),
            )
            .unwrap();

        let out = renderer
            .render(
                "page",
                &serde_json::json!({ "colors": ["red", "blue"] }),
            )
            .unwrap();

        assert_eq!(
            out,
            concat!(
                "<head>#circle { color: red; } #circle__2 { color: blue; }</head>",
                "<i id=\"circle\"></i><i id=\"circle__2\"></i>"
            )
        );
    }

    #[test]
    fn test_shared_memoized_binding() {
        let registry = Registry::default();
        let binding = registry.mint_binding("box", BindingOptions::new().once(true).defer(true));

        let mut renderer = PageRenderer::new(registry);
        renderer.add_binding("box_css", binding);
        renderer
            .add_template(
                "page",
                concat!(
                    "{{ stylesheet() }}|",
                    "{% for label in labels %}",
                    "<b id=\"{{ box_css.id }}\">{{ box_css.css(\"## { margin: 5px; }\") }}{{ label }}</b>",
                    "{% endfor %}"
                ),
            )
            .unwrap();

        let out = renderer
            .render("page", &serde_json::json!({ "labels": ["A", "B", "C"] }))
            .unwrap();

        assert!(out.starts_with("#box { margin: 5px; }|"));
        assert_eq!(out.matches("margin").count(), 1);
        assert_eq!(renderer.registry().len(), 1);
    }

    #[test]
    fn test_scope_kwargs() {
        let renderer = PageRenderer::new(Registry::default());
        let out = renderer
            .render_str(
                r##"{% set c = scope("card", placeholder="#x", prefix="ui-") %}{{ c.css("#x { }") }}"##,
                &(),
            )
            .unwrap();
        assert_eq!(out, "#ui-card { }");
    }

    #[test]
    fn test_scope_rejects_unknown_kwargs() {
        let renderer = PageRenderer::new(Registry::default());
        let result = renderer.render_str(r#"{{ scope("card", colour="red").id }}"#, &());
        assert!(result.is_err());
    }

    #[test]
    fn test_scoped_css_rejects_non_binding() {
        let renderer = PageRenderer::new(Registry::default());
        let result =
            renderer.render_str(r#"{% filter scoped_css("nope") %}## {}{% endfilter %}"#, &());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_binding_method() {
        let renderer = PageRenderer::new(Registry::default());
        let result = renderer.render_str(r#"{{ scope("card").paint() }}"#, &());
        assert!(result.is_err());
    }

    #[test]
    fn test_render_without_stylesheet_marker() {
        let renderer = PageRenderer::new(Registry::default());
        let out = renderer.render_str("plain", &()).unwrap();
        assert_eq!(out, "plain");
    }

    #[test]
    fn test_unknown_template_error() {
        let renderer = PageRenderer::new(Registry::default());
        assert!(renderer.render("missing", &()).is_err());
    }

    #[test]
    fn test_html_template_keeps_quoted_font_family() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("title.html"),
            concat!(
                "{% set t = scope(\"t\") %}",
                "<style>{% filter scoped_css(t) %}## { font-family: {{ font }}; }{% endfilter %}</style>",
                "<p>{{ font }}</p>"
            ),
        )
        .unwrap();

        let renderer = PageRenderer::with_template_dir(Registry::default(), dir.path());
        let out = renderer
            .render(
                "title.html",
                &serde_json::json!({ "font": "\"Open Sans\", sans-serif" }),
            )
            .unwrap();

        assert_eq!(
            out,
            concat!(
                "<style>#t { font-family: \"Open Sans\", sans-serif; }</style>",
                "<p>\"Open Sans\", sans-serif</p>"
            )
        );
    }

    #[test]
    fn test_html_escape_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("label.html"),
            "{% set t = scope(\"t\") %}<style>{{ t.css(rule) }}</style><p>{{ text }}</p>",
        )
        .unwrap();

        let mut renderer = PageRenderer::with_template_dir(Registry::default(), dir.path());
        renderer.set_html_escape(true);
        let out = renderer
            .render(
                "label.html",
                &serde_json::json!({
                    "rule": "## { font-family: \"Open Sans\"; }",
                    "text": "<b>",
                }),
            )
            .unwrap();

        assert_eq!(
            out,
            "<style>#t { font-family: \"Open Sans\"; }</style><p>&lt;b&gt;</p>"
        );
    }

    #[test]
    fn test_template_dir_loader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("badge.html"),
            r###"{% set b = scope("badge", defer=true) %}{{ b.css("## { }") }}{{ stylesheet() }}"###,
        )
        .unwrap();

        let renderer = PageRenderer::with_template_dir(Registry::default(), dir.path());
        let out = renderer.render("badge.html", &()).unwrap();
        assert_eq!(out, "#badge { }");
    }
}
