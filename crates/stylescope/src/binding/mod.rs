//! Style bindings and the templates they process.
//!
//! - [`StyleBinding`]: A scoped id plus the rules for applying it to templates
//! - [`BindingOptions`]: Per-binding overrides of the registry config
//! - [`StyleTemplate`]: Literal fragments interleaved with [`Substitution`] values

#[allow(clippy::module_inception)]
mod binding;
mod template;

pub use binding::{BindingOptions, StyleBinding};
pub use template::{StyleTemplate, Substitution};
