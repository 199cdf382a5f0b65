//! Style templates: literal fragments interleaved with substitution values.

use crate::config::SubstitutionPolicy;

/// A value interpolated between two template fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum Substitution {
    Number(f64),
    Text(String),
}

impl Substitution {
    /// Returns true for numeric zero, NaN and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            Substitution::Number(n) => *n == 0.0 || n.is_nan(),
            Substitution::Text(s) => s.is_empty(),
        }
    }
}

impl std::fmt::Display for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Substitution::Number(n) => write!(f, "{}", n),
            Substitution::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Substitution {
                fn from(value: $ty) -> Self {
                    Substitution::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Substitution {
    fn from(value: &str) -> Self {
        Substitution::Text(value.to_string())
    }
}

impl From<String> for Substitution {
    fn from(value: String) -> Self {
        Substitution::Text(value)
    }
}

impl From<&String> for Substitution {
    fn from(value: &String) -> Self {
        Substitution::Text(value.clone())
    }
}

/// An ordered list of literal fragments with one substitution slot between
/// each adjacent pair.
///
/// A template with `n` fragments has `n - 1` slots. Values beyond the last
/// slot are ignored and missing values leave their slot empty.
///
/// # Example
///
/// ```rust
/// use stylescope::{StyleTemplate, SubstitutionPolicy};
///
/// let template = StyleTemplate::new(["## { width: ", "px; }"], [100]);
/// assert_eq!(
///     template.interleave(SubstitutionPolicy::SkipFalsy),
///     "## { width: 100px; }"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleTemplate {
    fragments: Vec<String>,
    values: Vec<Substitution>,
}

impl StyleTemplate {
    /// Creates a template from fragments and values.
    pub fn new<F, V>(fragments: F, values: V) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<Substitution>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a template from already-built parts.
    pub fn from_parts(fragments: Vec<String>, values: Vec<Substitution>) -> Self {
        Self { fragments, values }
    }

    /// Creates a template with a single fragment and no slots.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![text.into()],
            values: Vec::new(),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn values(&self) -> &[Substitution] {
        &self.values
    }

    /// Joins fragments and values in textual order.
    ///
    /// Under [`SubstitutionPolicy::SkipFalsy`], falsy values are dropped
    /// instead of being written as `"0"` or `""`.
    pub fn interleave(&self, policy: SubstitutionPolicy) -> String {
        let mut out = String::new();
        let slots = self.fragments.len().saturating_sub(1);

        for (i, fragment) in self.fragments.iter().enumerate() {
            out.push_str(fragment);
            if i >= slots {
                continue;
            }
            if let Some(value) = self.values.get(i) {
                if policy == SubstitutionPolicy::SkipFalsy && value.is_falsy() {
                    continue;
                }
                out.push_str(&value.to_string());
            }
        }

        out
    }
}

impl From<&str> for StyleTemplate {
    fn from(text: &str) -> Self {
        StyleTemplate::literal(text)
    }
}

impl From<String> for StyleTemplate {
    fn from(text: String) -> Self {
        StyleTemplate::literal(text)
    }
}

impl From<&StyleTemplate> for StyleTemplate {
    fn from(template: &StyleTemplate) -> Self {
        template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(Substitution::from(5).to_string(), "5");
        assert_eq!(Substitution::from(1.5).to_string(), "1.5");
        assert_eq!(Substitution::from(-2i64).to_string(), "-2");
    }

    #[test]
    fn test_falsy_values() {
        assert!(Substitution::from(0).is_falsy());
        assert!(Substitution::from(-0.0).is_falsy());
        assert!(Substitution::from(f64::NAN).is_falsy());
        assert!(Substitution::from("").is_falsy());
        assert!(!Substitution::from("0").is_falsy());
        assert!(!Substitution::from(1).is_falsy());
    }

    #[test]
    fn test_interleave_order() {
        let template = StyleTemplate::new(["a", "b", "c"], ["1", "2"]);
        assert_eq!(template.interleave(SubstitutionPolicy::SkipFalsy), "a1b2c");
    }

    #[test]
    fn test_interleave_skips_falsy() {
        let template = StyleTemplate::new(
            ["margin: ", "; color: ", ";"],
            [Substitution::from(0), Substitution::from("")],
        );
        assert_eq!(
            template.interleave(SubstitutionPolicy::SkipFalsy),
            "margin: ; color: ;"
        );
    }

    #[test]
    fn test_interleave_always_keeps_zero() {
        let template = StyleTemplate::new(["margin: ", ";"], [0]);
        assert_eq!(template.interleave(SubstitutionPolicy::Always), "margin: 0;");
    }

    #[test]
    fn test_interleave_ignores_extra_values() {
        let template = StyleTemplate::new(["a", "b"], ["1", "2", "3"]);
        assert_eq!(template.interleave(SubstitutionPolicy::Always), "a1b");
    }

    #[test]
    fn test_interleave_missing_values() {
        let template = StyleTemplate::new(["a", "b", "c"], ["1"]);
        assert_eq!(template.interleave(SubstitutionPolicy::Always), "a1bc");
    }

    #[test]
    fn test_literal_and_from_str() {
        let template: StyleTemplate = "## { }".into();
        assert_eq!(template, StyleTemplate::literal("## { }"));
        assert!(template.values().is_empty());
        assert_eq!(template.fragments().len(), 1);
    }

    #[test]
    fn test_empty_template() {
        let template = StyleTemplate::default();
        assert_eq!(template.interleave(SubstitutionPolicy::SkipFalsy), "");
    }
}
