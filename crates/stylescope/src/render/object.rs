//! Exposes style bindings to templates as MiniJinja objects.

use std::sync::Arc;

use minijinja::value::{Enumerator, Object};
use minijinja::{Error, ErrorKind, State, Value};

use crate::binding::StyleBinding;

/// A [`StyleBinding`] wrapped for use inside templates.
///
/// Templates read `binding.id` (plus `scope`, `memoized` and `deferred`) and
/// apply styles with `binding.css(text)`.
#[derive(Debug)]
pub struct BindingObject {
    binding: StyleBinding,
}

impl BindingObject {
    pub fn new(binding: StyleBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &StyleBinding {
        &self.binding
    }

    /// Runs `text` through the binding, yielding the markup to embed inline.
    ///
    /// Deferred bindings embed nothing; their text surfaces in the stylesheet.
    pub(crate) fn apply(&self, text: &str) -> Value {
        match self.binding.invoke(text) {
            Some(css) => Value::from_safe_string(css),
            None => Value::from(""),
        }
    }
}

impl Object for BindingObject {
    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "id" => Some(Value::from(self.binding.id())),
            "scope" => Some(Value::from(self.binding.scope())),
            "memoized" => Some(Value::from(self.binding.is_memoized())),
            "deferred" => Some(Value::from(self.binding.is_deferred())),
            _ => None,
        }
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(&["id", "scope", "memoized", "deferred"])
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State,
        name: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match name {
            "css" => {
                // css(text) - apply the binding to a style block
                let text = args.first().ok_or_else(|| {
                    Error::new(
                        ErrorKind::MissingArgument,
                        "css() requires the style text",
                    )
                })?;
                Ok(self.apply(&text.to_string()))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("style binding has no method '{}'", name),
            )),
        }
    }
}

/// Extracts the binding object from a template value.
pub(crate) fn expect_binding(value: &Value, caller: &str) -> Result<Arc<BindingObject>, Error> {
    value.downcast_object::<BindingObject>().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("{}() expects a binding created with scope()", caller),
        )
    })
}
