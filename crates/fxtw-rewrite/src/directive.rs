//! Flex-Layout directive classification.
//!
//! Attribute names are split on the first `.` into a base name and an optional
//! breakpoint (`fxFlex.lt-lg` -> `fxFlex`, `lt-lg`). The base name must match a
//! known directive exactly, so `fxLayoutGap` is never read as a `fxLayout`
//! variant.

use std::fmt;

/// Directive families recognised by the rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Layout,
    LayoutGap,
    LayoutAlign,
    Flex,
    Fill,
    FlexFill,
    Hide,
    /// `[fxHide]="expr"` property binding.
    BoundHide,
}

impl DirectiveKind {
    /// Attribute base name of the family.
    #[must_use]
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Layout => "fxLayout",
            Self::LayoutGap => "fxLayoutGap",
            Self::LayoutAlign => "fxLayoutAlign",
            Self::Flex => "fxFlex",
            Self::Fill => "fxFill",
            Self::FlexFill => "fxFlexFill",
            Self::Hide | Self::BoundHide => "fxHide",
        }
    }

    /// Whether the family contributes to the `flex` container class.
    #[must_use]
    pub fn is_layout(self) -> bool {
        matches!(self, Self::Layout | Self::LayoutGap | Self::LayoutAlign)
    }

    fn from_base_name(name: &str) -> Option<Self> {
        Some(match name {
            "fxLayout" => Self::Layout,
            "fxLayoutGap" => Self::LayoutGap,
            "fxLayoutAlign" => Self::LayoutAlign,
            "fxFlex" => Self::Flex,
            "fxFill" => Self::Fill,
            "fxFlexFill" => Self::FlexFill,
            "fxHide" => Self::Hide,
            _ => return None,
        })
    }
}

/// Base names searched for when deciding whether a tag needs converting.
pub const DIRECTIVE_NAMES: &[&str] = &[
    "fxLayout",
    "fxLayoutGap",
    "fxLayoutAlign",
    "fxFlex",
    "fxFill",
    "fxFlexFill",
    "fxHide",
];

/// A classified directive attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Full attribute name as written on the tag.
    pub attribute: String,
    pub breakpoint: Option<String>,
}

impl Directive {
    #[must_use]
    pub fn breakpoint(&self) -> Option<&str> {
        self.breakpoint.as_deref()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.attribute)
    }
}

/// Classify an attribute name.
///
/// Returns `None` for anything that is not a known directive, including
/// bracket-bound forms other than `[fxHide]`.
///
/// # Example
///
/// ```
/// use fxtw_rewrite::directive::{classify, DirectiveKind};
///
/// let d = classify("fxLayoutGap.gt-sm").unwrap();
/// assert_eq!(d.kind, DirectiveKind::LayoutGap);
/// assert_eq!(d.breakpoint(), Some("gt-sm"));
/// assert!(classify("fxLayoutGapX").is_none());
/// ```
#[must_use]
pub fn classify(attribute: &str) -> Option<Directive> {
    let (unbound, bound) = match attribute
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        Some(inner) => (inner, true),
        None => (attribute, false),
    };

    let (base, breakpoint) = match unbound.split_once('.') {
        Some((base, bp)) if !bp.is_empty() => (base, Some(bp)),
        Some(_) => return None,
        None => (unbound, None),
    };

    let kind = match (DirectiveKind::from_base_name(base)?, bound) {
        (DirectiveKind::Hide, true) => DirectiveKind::BoundHide,
        (kind, false) => kind,
        (_, true) => return None,
    };

    Some(Directive {
        kind,
        attribute: attribute.to_owned(),
        breakpoint: breakpoint.map(str::to_owned),
    })
}

/// Whether `text` mentions any directive name at all.
///
/// A cheap substring pre-filter; tags that pass still go through [`classify`].
#[must_use]
pub fn mentions_directive(text: &str) -> bool {
    DIRECTIVE_NAMES.iter().any(|name| text.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind(name: &str) -> Option<DirectiveKind> {
        classify(name).map(|d| d.kind)
    }

    #[test]
    fn test_exact_names() {
        assert_eq!(kind("fxLayout"), Some(DirectiveKind::Layout));
        assert_eq!(kind("fxLayoutGap"), Some(DirectiveKind::LayoutGap));
        assert_eq!(kind("fxLayoutAlign"), Some(DirectiveKind::LayoutAlign));
        assert_eq!(kind("fxFlex"), Some(DirectiveKind::Flex));
        assert_eq!(kind("fxFill"), Some(DirectiveKind::Fill));
        assert_eq!(kind("fxFlexFill"), Some(DirectiveKind::FlexFill));
        assert_eq!(kind("fxHide"), Some(DirectiveKind::Hide));
    }

    #[test]
    fn test_shared_prefix_is_not_enough() {
        assert_eq!(kind("fxLayoutGrid"), None);
        assert_eq!(kind("fxFlexOrder"), None);
        assert_eq!(kind("fxFlexAlign"), None);
        assert_eq!(kind("fxLayoutx"), None);
    }

    #[test]
    fn test_breakpoint_suffix() {
        let d = classify("fxFlex.lt-lg").unwrap();
        assert_eq!(d.kind, DirectiveKind::Flex);
        assert_eq!(d.breakpoint(), Some("lt-lg"));
        assert_eq!(d.attribute, "fxFlex.lt-lg");
        assert_eq!(d.to_string(), "fxFlex.lt-lg");
    }

    #[test]
    fn test_breakpoint_split_on_first_dot() {
        let d = classify("fxHide.gt-sm.print").unwrap();
        assert_eq!(d.breakpoint(), Some("gt-sm.print"));
    }

    #[test]
    fn test_empty_breakpoint_rejected() {
        assert_eq!(kind("fxFlex."), None);
    }

    #[test]
    fn test_bound_hide() {
        assert_eq!(kind("[fxHide]"), Some(DirectiveKind::BoundHide));
        let d = classify("[fxHide.xs]").unwrap();
        assert_eq!(d.kind, DirectiveKind::BoundHide);
        assert_eq!(d.breakpoint(), Some("xs"));
    }

    #[test]
    fn test_other_bound_directives_ignored() {
        assert_eq!(kind("[fxFlex]"), None);
        assert_eq!(kind("[fxLayout]"), None);
    }

    #[test]
    fn test_unrelated_attributes() {
        assert_eq!(kind("class"), None);
        assert_eq!(kind("id"), None);
        assert_eq!(kind("(click)"), None);
    }

    #[test]
    fn test_layout_family() {
        assert!(DirectiveKind::Layout.is_layout());
        assert!(DirectiveKind::LayoutAlign.is_layout());
        assert!(!DirectiveKind::Flex.is_layout());
    }

    #[test]
    fn test_mentions_directive() {
        assert!(mentions_directive(r#"<div fxFlex="50%">"#));
        assert!(mentions_directive(r#"<div title="fxHide">"#));
        assert!(!mentions_directive(r#"<div class="flex">"#));
    }
}
