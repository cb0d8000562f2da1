//! Utility class token formatting.

/// Formats utility class tokens with the configured prefix and breakpoint variant.
///
/// # Example
///
/// ```
/// use fxtw_rewrite::ClassBuilder;
///
/// let builder = ClassBuilder::new("tw");
/// assert_eq!(builder.build(&["flex", "flex-row"], None), "tw-flex tw-flex-row");
/// assert_eq!(builder.build(&["basis-1/2"], Some("lt-lg")), "lt-lg:tw-basis-1/2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassBuilder {
    prefix: String,
}

impl ClassBuilder {
    /// Create a builder for `prefix`.
    ///
    /// A non-empty prefix that does not end in `-` gets one appended.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let prefix = if prefix.is_empty() || prefix.ends_with('-') {
            prefix.to_owned()
        } else {
            format!("{prefix}-")
        };
        Self { prefix }
    }

    /// Normalized prefix (empty, or ending in `-`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Join `tokens` into one class string.
    ///
    /// Empty tokens are dropped. The breakpoint variant is prepended once to the
    /// joined string, not to each token.
    #[must_use]
    pub fn build<S: AsRef<str>>(&self, tokens: &[S], breakpoint: Option<&str>) -> String {
        let joined = tokens
            .iter()
            .map(AsRef::as_ref)
            .filter(|token| !token.is_empty())
            .map(|token| format!("{}{token}", self.prefix))
            .collect::<Vec<_>>()
            .join(" ");

        match breakpoint {
            Some(bp) if !joined.is_empty() => format!("{bp}:{joined}"),
            _ => joined,
        }
    }

    /// Build a single token.
    #[must_use]
    pub fn token(&self, token: &str, breakpoint: Option<&str>) -> String {
        self.build(&[token], breakpoint)
    }
}
