//! Proc macros for building style templates in Stylescope.
//!
//! # Macros
//!
//! - [`css!`] - Build a `StyleTemplate` from a string literal with `${expr}` interpolations
//!
//! # Example
//!
//! ```rust,ignore
//! use stylescope::{css, Registry};
//!
//! let color = "red";
//! let size = 100;
//!
//! let registry = Registry::default();
//! let binding = registry.mint("circle");
//! let text = binding.invoke(css!(
//!     "## { background-color: ${color}; width: ${size}px; }"
//! ));
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Expr, LitStr};

/// Builds a `StyleTemplate` from a string literal.
///
/// Every `${expr}` in the literal becomes a substitution slot holding `expr`
/// converted with `Substitution::from`; the text around the slots becomes the
/// template's fragments. Write `$${` for a literal `${`.
///
/// # Example
///
/// ```rust,ignore
/// let template = css!("## { margin: ${gap}px ${gap * 2}px; }");
/// // fragments: ["## { margin: ", "px ", "px; }"]
/// // values:    [gap, gap * 2]
/// ```
///
/// # Compile-Time Errors
///
/// - `${` without a closing `}`
/// - An empty `${}`
/// - Contents of `${...}` that are not a valid expression
#[proc_macro]
pub fn css(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);

    let (fragments, sources) = match split_template(&lit.value()) {
        Ok(parts) => parts,
        Err(message) => {
            return syn::Error::new(lit.span(), message)
                .to_compile_error()
                .into();
        }
    };

    let mut exprs = Vec::with_capacity(sources.len());
    for source in &sources {
        match syn::parse_str::<Expr>(source) {
            Ok(expr) => exprs.push(expr),
            Err(e) => {
                return syn::Error::new(
                    lit.span(),
                    format!("invalid expression `{}` in css!: {}", source, e),
                )
                .to_compile_error()
                .into();
            }
        }
    }

    let expanded: proc_macro2::TokenStream = quote! {
        ::stylescope::StyleTemplate::from_parts(
            ::std::vec![#(::std::string::String::from(#fragments)),*],
            ::std::vec![#(::stylescope::Substitution::from(#exprs)),*],
        )
    };

    expanded.into()
}

/// Splits a template literal into fragments and the sources of its `${...}` slots.
///
/// Always returns one more fragment than slots.
fn split_template(input: &str) -> Result<(Vec<String>, Vec<String>), String> {
    let mut fragments = Vec::new();
    let mut sources = Vec::new();
    let mut current = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '$' {
            current.push(c);
            continue;
        }

        let rest = &input[i + 1..];
        if rest.starts_with("${") {
            // Escaped: `$${` is a literal `${`
            chars.next();
            chars.next();
            current.push_str("${");
            continue;
        }
        if !rest.starts_with('{') {
            current.push(c);
            continue;
        }

        chars.next();
        let mut depth = 1;
        let mut source = String::new();
        for (_, inner) in chars.by_ref() {
            match inner {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            source.push(inner);
        }

        if depth != 0 {
            return Err("unterminated `${` in css! template".to_string());
        }
        if source.trim().is_empty() {
            return Err("empty `${}` in css! template".to_string());
        }

        fragments.push(std::mem::take(&mut current));
        sources.push(source.trim().to_string());
    }

    fragments.push(current);
    Ok((fragments, sources))
}
