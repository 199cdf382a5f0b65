//! # Stylescope - Scoped Style Registration
//!
//! `stylescope` gives UI components stable, collision-free ids and lets each
//! component declare a block of CSS keyed to its own id. Style text is either
//! returned for inline embedding or collected by a [`Registry`] and emitted
//! once, as a single stylesheet, at the end of a render pass.
//!
//! ## Core Concepts
//!
//! - [`Registry`]: Allocates per-scope ids and stores registered style text
//! - [`StyleBinding`]: One minted id plus the rules for applying it to templates
//! - [`StyleTemplate`]: Literal fragments interleaved with [`Substitution`] values
//! - [`RegistryConfig`]: Placeholder token, id scheme, storage profile and more
//! - [`ChangeEvent`]: Add, remove and clear notifications for listeners
//! - [`PageRenderer`]: MiniJinja renderer that emits the stylesheet last
//!
//! ## Quick Start
//!
//! ```rust
//! use stylescope::{BindingOptions, Registry, StyleTemplate};
//!
//! let registry = Registry::default();
//!
//! // One binding per logical component instance
//! let css = registry.mint_binding("box", BindingOptions::new().defer(true));
//!
//! // The placeholder `##` becomes `#box`
//! let template = StyleTemplate::new(["## { background: ", "; }"], ["teal"]);
//! assert_eq!(css.invoke(template), None);
//!
//! // After every component has rendered
//! assert_eq!(registry.all_css(), "#box { background: teal; }");
//! ```
//!
//! ## Immediate, Deferred and Memoized Bindings
//!
//! An immediate binding returns its processed text for the caller to embed.
//! A deferred binding stores the text in its registry and returns `None`.
//! A memoized binding computes its text on the first call and returns the same
//! text forever after, which suits static style blocks shared by many
//! instances of one component:
//!
//! ```rust
//! use stylescope::{BindingOptions, Registry, StyleTemplate};
//!
//! let registry = Registry::default();
//! let css = registry.mint_binding("label", BindingOptions::new().once(true));
//!
//! let first = css.invoke(StyleTemplate::new(["## { width: ", "px; }"], [100]));
//! let second = css.invoke(StyleTemplate::new(["## { width: ", "px; }"], [200]));
//! assert_eq!(first.as_deref(), Some("#label { width: 100px; }"));
//! assert_eq!(first, second);
//! ```
//!
//! ## Change Notification
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use stylescope::{ChangeKind, Registry};
//!
//! let registry = Registry::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let subscription = registry.on_change(move |event| sink.lock().unwrap().push(event.kind()));
//!
//! registry.register_style("a", "#a { }");
//! registry.remove_css("a");
//! registry.clear_css();
//! subscription.unsubscribe();
//! registry.register_style("b", "#b { }");
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![ChangeKind::Add, ChangeKind::Remove, ChangeKind::Clear]
//! );
//! ```
//!
//! ## Templates with `css!`
//!
//! With the `macros` feature, `css!` builds a [`StyleTemplate`] from a string
//! literal with `${expr}` interpolations:
//!
//! ```rust,ignore
//! use stylescope::{css, Registry};
//!
//! let color = "red";
//! let registry = Registry::default();
//! let binding = registry.mint("circle");
//! let text = binding.invoke(css!("## { background-color: ${color}; }"));
//! ```

mod binding;
mod config;
mod error;
mod global;
mod registry;
pub mod render;
mod util;

pub use binding::{BindingOptions, StyleBinding, StyleTemplate, Substitution};
pub use config::{
    IdScheme, RegistryConfig, StoreMode, SubstitutionPolicy, WhitespaceMode, DEFAULT_PLACEHOLDER,
    DEFAULT_SCOPE,
};
pub use error::ConfigError;
pub use global::{clear_css, create_css, css, default_registry, get_all_css, remove_css};
pub use registry::{create_registry, ChangeEvent, ChangeKind, Registry, Subscription};
pub use render::PageRenderer;
pub use util::{collapse_whitespace, replace_placeholder};

#[cfg(feature = "macros")]
pub use stylescope_macros::css;
