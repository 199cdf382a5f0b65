//! Style bindings: ids minted by a registry, applied to style templates.

use std::sync::Weak;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use super::template::StyleTemplate;
use crate::config::{RegistryConfig, SubstitutionPolicy, WhitespaceMode};
use crate::registry::{Registry, Shared};
use crate::util::{collapse_whitespace, replace_placeholder};

/// Per-binding overrides of the registry config.
///
/// Unset fields inherit the minting registry's [`RegistryConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingOptions {
    pub placeholder: Option<String>,
    pub once: Option<bool>,
    pub defer: Option<bool>,
    pub prefix: Option<String>,
}

impl BindingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token replaced by `#<id>`.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Computes the style text on first invocation and reuses it afterwards.
    pub fn once(mut self, once: bool) -> Self {
        self.once = Some(once);
        self
    }

    /// Registers the style text with the registry instead of returning it.
    pub fn defer(mut self, defer: bool) -> Self {
        self.defer = Some(defer);
        self
    }

    /// Sets the id prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub(crate) fn resolve(self, config: &RegistryConfig) -> BindingSettings {
        BindingSettings {
            placeholder: self
                .placeholder
                .unwrap_or_else(|| config.placeholder.clone()),
            prefix: self.prefix.unwrap_or_else(|| config.prefix.clone()),
            once: self.once.unwrap_or(config.once),
            defer: self.defer.unwrap_or(config.defer),
            whitespace: config.whitespace,
            trim: config.trim,
            substitutions: config.substitutions,
        }
    }
}

/// Fully resolved settings for one binding.
#[derive(Debug, Clone)]
pub(crate) struct BindingSettings {
    pub(crate) placeholder: String,
    pub(crate) prefix: String,
    pub(crate) once: bool,
    pub(crate) defer: bool,
    pub(crate) whitespace: WhitespaceMode,
    pub(crate) trim: bool,
    pub(crate) substitutions: SubstitutionPolicy,
}

/// A scoped id together with the rules for turning templates into style text.
///
/// Bindings are created by [`Registry::mint_binding`]. Attach
/// [`id`](Self::id) to the component's root element and pass the component's
/// style template to [`invoke`](Self::invoke); every placeholder in the
/// template becomes `#<id>`.
///
/// Depending on its options, an invocation:
///
/// - returns the processed text (immediate),
/// - stores it in the registry under the binding's id and returns `None` (deferred),
/// - reuses the text from the first invocation, ignoring later templates (memoized).
///
/// # Example
///
/// ```rust
/// use stylescope::{Registry, StyleTemplate};
///
/// let registry = Registry::default();
/// let css = registry.mint("box");
///
/// let text = css.invoke(StyleTemplate::new(
///     ["## {\n  background: ", ";\n}\n## .label { color: #0ff; }"],
///     ["red"],
/// ));
/// assert_eq!(
///     text.as_deref(),
///     Some("#box { background: red; } #box .label { color: #0ff; }")
/// );
/// ```
pub struct StyleBinding {
    id: String,
    scope: String,
    settings: BindingSettings,
    registry: Weak<Shared>,
    memo: OnceCell<String>,
}

impl StyleBinding {
    pub(crate) fn new(
        id: String,
        scope: &str,
        settings: BindingSettings,
        registry: Weak<Shared>,
    ) -> Self {
        Self {
            id,
            scope: scope.to_string(),
            settings,
            registry,
            memo: OnceCell::new(),
        }
    }

    /// The scoped id, e.g. `box__2`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The scope name this binding was minted for.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn placeholder(&self) -> &str {
        &self.settings.placeholder
    }

    pub fn is_memoized(&self) -> bool {
        self.settings.once
    }

    pub fn is_deferred(&self) -> bool {
        self.settings.defer
    }

    /// Returns true once a memoized binding has cached its text.
    pub fn is_computed(&self) -> bool {
        self.memo.get().is_some()
    }

    /// The registry that minted this binding, if it is still alive.
    pub fn registry(&self) -> Option<Registry> {
        self.registry.upgrade().map(Registry::from_shared)
    }

    /// Turns a template into style text without memoization or registration.
    ///
    /// Interleaves fragments and values, substitutes the placeholder, then
    /// applies the whitespace policy.
    pub fn process(&self, template: &StyleTemplate) -> String {
        let joined = template.interleave(self.settings.substitutions);

        if !joined.contains(self.settings.placeholder.as_str()) {
            debug!(
                id = %self.id,
                placeholder = %self.settings.placeholder,
                "style template never references its placeholder"
            );
        }

        let substituted = replace_placeholder(&joined, &self.settings.placeholder, &self.id);
        collapse_whitespace(&substituted, self.settings.whitespace, self.settings.trim)
    }

    /// Applies the binding to a template.
    ///
    /// Returns the processed text for immediate bindings and `None` for
    /// deferred ones. A memoized binding processes only its first template;
    /// every later call yields that same text, whatever template is passed.
    pub fn invoke<T: Into<StyleTemplate>>(&self, template: T) -> Option<String> {
        let text = if self.settings.once {
            self.memo
                .get_or_init(|| self.process(&template.into()))
                .clone()
        } else {
            self.process(&template.into())
        };

        if !self.settings.defer {
            return Some(text);
        }

        match self.registry() {
            Some(registry) => registry.register_style(self.id.clone(), text),
            None => warn!(id = %self.id, "registry dropped before deferred style was registered"),
        }
        None
    }
}

impl std::fmt::Debug for StyleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleBinding")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("settings", &self.settings)
            .field("computed", &self.is_computed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StoreMode, WhitespaceMode};
    use crate::Substitution;

    // =========================================================================
    // Processing
    // =========================================================================

    #[test]
    fn test_placeholder_becomes_id_selector() {
        let registry = Registry::default();
        registry.mint("box");
        let binding = registry.mint("box");

        let out = binding.invoke("## { color: red; }").unwrap();
        assert!(out.contains("#box__2"));
        assert!(!out.contains("##"));
    }

    #[test]
    fn test_custom_placeholder() {
        let registry = Registry::default();
        let binding = registry.mint_binding("card", BindingOptions::new().placeholder("#x"));

        assert_eq!(binding.placeholder(), "#x");
        assert_eq!(binding.invoke("#x > p { }").as_deref(), Some("#card > p { }"));
    }

    #[test]
    fn test_unknown_placeholder_passes_through() {
        let registry = Registry::default();
        let binding = registry.mint_binding("card", BindingOptions::new().placeholder("#x"));

        assert_eq!(binding.invoke("## { }").as_deref(), Some("## { }"));
    }

    #[test]
    fn test_collapses_whitespace() {
        let registry = Registry::default();
        let binding = registry.mint("box");

        let out = binding
            .invoke("\n  ## {\n\n    width:   500px;\n  }\n")
            .unwrap();
        assert_eq!(out, "#box { width: 500px; }");
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_strip_mode_removes_all_whitespace() {
        let registry =
            Registry::new(RegistryConfig::new().with_whitespace(WhitespaceMode::Strip));
        let binding = registry.mint("box");

        let out = binding.invoke("## {\n  width: 500px;\n}").unwrap();
        assert_eq!(out, "#box{width:500px;}");
    }

    #[test]
    fn test_zero_substitution_is_skipped() {
        let registry = Registry::default();
        let binding = registry.mint("box");

        let out = binding
            .invoke(StyleTemplate::new(["## { margin: ", "; }"], [0]))
            .unwrap();
        assert_eq!(out, "#box { margin: ; }");
    }

    #[test]
    fn test_always_policy_keeps_zero() {
        let registry = Registry::new(
            RegistryConfig::new().with_substitutions(SubstitutionPolicy::Always),
        );
        let binding = registry.mint("box");

        let out = binding
            .invoke(StyleTemplate::new(["## { margin: ", "; }"], [0]))
            .unwrap();
        assert_eq!(out, "#box { margin: 0; }");
    }

    #[test]
    fn test_immediate_binding_recomputes() {
        let registry = Registry::default();
        let binding = registry.mint("circle");

        let red = binding.invoke(StyleTemplate::new(["## { color: ", "; }"], ["red"]));
        let blue = binding.invoke(StyleTemplate::new(["## { color: ", "; }"], ["blue"]));

        assert_eq!(red.as_deref(), Some("#circle { color: red; }"));
        assert_eq!(blue.as_deref(), Some("#circle { color: blue; }"));
        assert!(!binding.is_computed());
    }

    // =========================================================================
    // Memoization
    // =========================================================================

    #[test]
    fn test_memoized_binding_ignores_later_values() {
        let registry = Registry::default();
        let binding = registry.mint_binding("box", BindingOptions::new().once(true));
        assert!(binding.is_memoized());
        assert!(!binding.is_computed());

        let first = binding.invoke(StyleTemplate::new(["## { width: ", "px; }"], [100]));
        assert!(binding.is_computed());
        let second = binding.invoke(StyleTemplate::new(["## { width: ", "px; }"], [200]));

        assert_eq!(first.as_deref(), Some("#box { width: 100px; }"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_memoized_from_registry_default() {
        let registry = Registry::new(RegistryConfig::new().with_once(true));
        let binding = registry.mint("box");

        binding.invoke("## { a: 1; }");
        assert_eq!(binding.invoke("## { b: 2; }").as_deref(), Some("#box { a: 1; }"));
    }

    // =========================================================================
    // Deferred registration
    // =========================================================================

    #[test]
    fn test_deferred_binding_registers_and_returns_none() {
        let registry = Registry::default();
        let binding = registry.mint_binding("box", BindingOptions::new().defer(true));
        assert!(binding.is_deferred());

        assert_eq!(binding.invoke("## { color: red; }"), None);
        assert_eq!(registry.get("box").as_deref(), Some("#box { color: red; }"));
        assert_eq!(registry.all_css(), "#box { color: red; }");
    }

    #[test]
    fn test_deferred_reinvocation_overwrites() {
        let registry = Registry::default();
        let binding = registry.mint_binding("box", BindingOptions::new().defer(true));

        binding.invoke("## { color: red; }");
        binding.invoke("## { color: blue; }");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all_css(), "#box { color: blue; }");
    }

    #[test]
    fn test_deferred_memoized_append_only_repeats_cached_text() {
        let registry = Registry::new(
            RegistryConfig::new()
                .with_store(StoreMode::AppendOnly)
                .with_defer(true)
                .with_once(true),
        );
        let binding = registry.mint("box");

        binding.invoke("## { a: 1; }");
        binding.invoke("## { b: 2; }");

        assert_eq!(registry.all_css(), "#box { a: 1; } #box { a: 1; }");
    }

    #[test]
    fn test_deferred_after_registry_dropped() {
        let registry = Registry::default();
        let binding = registry.mint_binding("box", BindingOptions::new().defer(true));
        drop(registry);

        assert!(binding.registry().is_none());
        assert_eq!(binding.invoke("## { }"), None);
    }

    #[test]
    fn test_options_override_registry_defaults() {
        let registry = Registry::new(RegistryConfig::new().with_defer(true));
        let binding = registry.mint_binding("box", BindingOptions::new().defer(false));

        assert!(!binding.is_deferred());
        assert_eq!(binding.invoke("## { }").as_deref(), Some("#box { }"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_process_does_not_touch_memo_or_registry() {
        let registry = Registry::default();
        let binding = registry.mint_binding("box", BindingOptions::new().once(true).defer(true));

        let text = binding.process(&StyleTemplate::from_parts(
            vec!["## { z-index: ".into(), "; }".into()],
            vec![Substitution::from(3)],
        ));
        assert_eq!(text, "#box { z-index: 3; }");
        assert!(!binding.is_computed());
        assert!(registry.is_empty());
    }
}
