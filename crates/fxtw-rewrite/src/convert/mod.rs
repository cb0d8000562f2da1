//! Directive converters.
//!
//! Each converter reads one directive declaration, adds the equivalent utility
//! classes through the [`ClassBuilder`], and removes the declaration. A value
//! that cannot be converted leaves the declaration in place and records a
//! [`Diagnostic`]. Running a converter again on the rewritten tag is a no-op
//! because the source declaration is gone.

mod flex;
mod layout;
mod visibility;

use crate::classes::ClassBuilder;
use crate::diagnostic::Diagnostic;
use crate::directive::{Directive, DirectiveKind, classify};
use crate::tag::Tag;

/// Shared state for converting one tag.
pub(crate) struct Context<'a> {
    builder: &'a ClassBuilder,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(builder: &'a ClassBuilder) -> Self {
        Self {
            builder,
            diagnostics: Vec::new(),
        }
    }

    /// Build one class per token, each carrying the breakpoint variant.
    fn classes(&self, tokens: &[&str], breakpoint: Option<&str>) -> Vec<String> {
        tokens
            .iter()
            .map(|token| self.builder.token(token, breakpoint))
            .filter(|class| !class.is_empty())
            .collect()
    }

    /// Record a directive that was left unconverted.
    fn skip(&mut self, directive: &Directive, value: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(
            directive = %directive,
            value = %value,
            "{message}, directive left unchanged"
        );
        self.diagnostics.push(Diagnostic {
            line: 0,
            attribute: directive.attribute.clone(),
            value: value.to_owned(),
            message,
        });
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Convert every directive on `tag`.
///
/// The `fxLayout*` family is converted as a group first so the `flex` class is
/// added once per tag. The remaining directives follow in document order.
pub(crate) fn convert_tag(tag: &mut Tag, ctx: &mut Context<'_>) {
    let directives: Vec<Directive> = tag.attributes().filter_map(|a| classify(a.name())).collect();
    if directives.is_empty() {
        return;
    }

    layout::convert_layout_group(tag, &directives, ctx);

    for directive in &directives {
        match directive.kind {
            DirectiveKind::Flex => flex::convert_flex(tag, directive, ctx),
            DirectiveKind::Fill | DirectiveKind::FlexFill => {
                visibility::convert_fill(tag, directive, ctx);
            }
            DirectiveKind::Hide => visibility::convert_hide(tag, directive, ctx),
            DirectiveKind::Layout
            | DirectiveKind::LayoutGap
            | DirectiveKind::LayoutAlign
            | DirectiveKind::BoundHide => {}
        }
    }

    visibility::convert_bound_hides(tag, &directives, ctx);
}

/// Parse a non-negative number, accepting integers and decimals.
fn parse_number(s: &str) -> Option<f64> {
    let n: f64 = s.parse().ok()?;
    (n.is_finite() && n >= 0.0).then_some(n)
}

/// Format a number without a trailing `.0` for whole values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n < 1e15 {
        (n as u64).to_string()
    } else {
        n.to_string()
    }
}

/// Wrap a raw CSS value as an arbitrary utility value (`[...]`).
///
/// Whitespace is not allowed inside class names, so it becomes `_`.
fn arbitrary(value: &str) -> String {
    let joined = value.split_whitespace().collect::<Vec<_>>().join("_");
    format!("[{joined}]")
}
