//! MiniJinja integration.
//!
//! [`PageRenderer`] plays the rendering layer for a [`Registry`](crate::Registry):
//! templates mint bindings, embed immediate styles inline and reserve a
//! stylesheet slot that is filled after the page body has rendered.

mod functions;
mod object;
mod renderer;

pub use functions::STYLESHEET_MARKER;
pub use object::BindingObject;
pub use renderer::PageRenderer;
