//! Text primitives for style processing.

use crate::config::WhitespaceMode;

/// Replaces every occurrence of `placeholder` with an id selector for `id`.
///
/// Replacement is purely textual; the placeholder is not required to sit in
/// selector position. An empty placeholder matches nothing.
///
/// # Example
///
/// ```rust
/// use stylescope::replace_placeholder;
///
/// assert_eq!(
///     replace_placeholder("## > header, ##-contents", "##", "box__2"),
///     "#box__2 > header, #box__2-contents"
/// );
/// ```
pub fn replace_placeholder(text: &str, placeholder: &str, id: &str) -> String {
    if placeholder.is_empty() {
        return text.to_string();
    }
    text.replace(placeholder, &format!("#{}", id))
}

/// Collapses whitespace runs according to `mode`, optionally trimming the ends.
///
/// # Example
///
/// ```rust
/// use stylescope::{collapse_whitespace, WhitespaceMode};
///
/// let css = "\n  #a {\n    margin: 0 auto;\n  }\n";
/// assert_eq!(
///     collapse_whitespace(css, WhitespaceMode::Collapse, true),
///     "#a { margin: 0 auto; }"
/// );
/// assert_eq!(
///     collapse_whitespace(css, WhitespaceMode::Strip, true),
///     "#a{margin:0auto;}"
/// );
/// ```
pub fn collapse_whitespace(text: &str, mode: WhitespaceMode, trim: bool) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if c.is_whitespace() {
            in_run = true;
            continue;
        }
        if in_run && mode == WhitespaceMode::Collapse {
            result.push(' ');
        }
        in_run = false;
        result.push(c);
    }

    // A trailing run never reaches the push above
    if in_run && mode == WhitespaceMode::Collapse && !trim {
        result.push(' ');
    }

    if trim {
        // Only a leading space can remain at this point
        if let Some(stripped) = result.strip_prefix(' ') {
            return stripped.to_string();
        }
    }

    result
}
