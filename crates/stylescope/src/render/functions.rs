//! MiniJinja function and filter registration.

use minijinja::value::Kwargs;
use minijinja::{Environment, Error, Value};

use super::object::{expect_binding, BindingObject};
use crate::binding::BindingOptions;
use crate::registry::Registry;

/// Marker emitted by `stylesheet()` and swapped for the aggregated style text
/// once the whole page has rendered.
pub const STYLESHEET_MARKER: &str = "<!--stylescope:stylesheet-->";

/// Registers the style functions and filters on a minijinja environment.
///
/// - `scope(name, once=, defer=, placeholder=, prefix=)` mints a binding
/// - `stylesheet()` reserves the spot for the aggregated style text
/// - `scoped_css(binding)` filter applies a binding to the filtered block
pub(crate) fn register_functions(env: &mut Environment<'static>, registry: Registry) {
    env.add_function(
        "scope",
        move |name: String, kwargs: Kwargs| -> Result<Value, Error> {
            let mut options = BindingOptions::new();
            if let Some(once) = kwargs.get::<Option<bool>>("once")? {
                options = options.once(once);
            }
            if let Some(defer) = kwargs.get::<Option<bool>>("defer")? {
                options = options.defer(defer);
            }
            if let Some(placeholder) = kwargs.get::<Option<String>>("placeholder")? {
                options = options.placeholder(placeholder);
            }
            if let Some(prefix) = kwargs.get::<Option<String>>("prefix")? {
                options = options.prefix(prefix);
            }
            kwargs.assert_all_used()?;

            let binding = registry.mint_binding(&name, options);
            Ok(Value::from_object(BindingObject::new(binding)))
        },
    );

    env.add_function("stylesheet", || -> Value {
        Value::from_safe_string(STYLESHEET_MARKER.to_string())
    });

    // Usage: {% filter scoped_css(card) %} ## { color: red; } {% endfilter %}
    env.add_filter(
        "scoped_css",
        |text: String, binding: Value| -> Result<Value, Error> {
            let binding = expect_binding(&binding, "scoped_css")?;
            Ok(binding.apply(&text))
        },
    );
}
