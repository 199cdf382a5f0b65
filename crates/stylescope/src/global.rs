//! Process-wide default registry.
//!
//! Small applications can mint bindings and collect their style text without
//! threading a [`Registry`] through every component. The default registry is
//! constructed on first use with [`RegistryConfig::default`] and lives for the
//! rest of the process.
//!
//! Code that needs isolation (tests, multiple documents rendered side by side)
//! should create its own registries with [`create_registry`](crate::create_registry).

use once_cell::sync::Lazy;

use crate::binding::{BindingOptions, StyleBinding};
use crate::config::RegistryConfig;
use crate::registry::Registry;

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(|| Registry::new(RegistryConfig::default()));

static DEFAULT_BINDING: Lazy<StyleBinding> = Lazy::new(|| {
    DEFAULT_REGISTRY.mint_default(BindingOptions::new().once(false).defer(false))
});

/// Returns the process-wide default registry.
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Returns a ready-made immediate binding in the default scope.
///
/// The binding is minted from the default registry on first use and shared
/// from then on, so every caller sees the same id. It neither memoizes nor
/// registers: each call returns freshly processed text.
///
/// # Example
///
/// ```rust
/// let css = stylescope::css();
/// let text = css.invoke("## { display: block; }");
/// assert_eq!(text, Some(format!("#{} {{ display: block; }}", css.id())));
/// ```
pub fn css() -> &'static StyleBinding {
    &DEFAULT_BINDING
}

/// Mints a binding for `scope_name` from the default registry.
///
/// # Example
///
/// ```rust
/// use stylescope::{create_css, get_all_css, BindingOptions};
///
/// let css = create_css("doc-example-panel", BindingOptions::new().defer(true));
/// css.invoke("## { padding: 4px; }");
///
/// assert!(get_all_css().contains(&format!("#{} {{ padding: 4px; }}", css.id())));
/// ```
pub fn create_css(scope_name: &str, options: BindingOptions) -> StyleBinding {
    DEFAULT_REGISTRY.mint_binding(scope_name, options)
}

/// Returns all style text registered with the default registry.
pub fn get_all_css() -> String {
    DEFAULT_REGISTRY.all_css()
}

/// Removes an entry from the default registry.
pub fn remove_css(id: &str) -> bool {
    DEFAULT_REGISTRY.remove_css(id)
}

/// Empties the default registry.
pub fn clear_css() {
    DEFAULT_REGISTRY.clear_css()
}
