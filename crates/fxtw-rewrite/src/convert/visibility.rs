//! `fxFill`, `fxFlexFill`, `fxHide` and `[fxHide]`.

use super::Context;
use crate::directive::{Directive, DirectiveKind};
use crate::tag::Tag;

const FILL_CLASSES: &[&str] = &["h-full", "w-full", "min-h-full", "min-w-full"];

/// Class applied in place of `fxHide`.
const COLLAPSE_CLASS: &str = "hidden";

/// Attribute receiving the conditional classes of `[fxHide]` bindings.
const BOUND_CLASS_ATTRIBUTE: &str = "[ngClass]";

pub(super) fn convert_fill(tag: &mut Tag, directive: &Directive, ctx: &mut Context<'_>) {
    if !tag.has_attribute(&directive.attribute) {
        return;
    }
    let classes = ctx.classes(FILL_CLASSES, directive.breakpoint());
    tag.add_classes(classes);
    tag.remove_attribute(&directive.attribute);
}

/// `fxHide` adds the collapse class; `fxHide="false"` only drops the attribute.
pub(super) fn convert_hide(tag: &mut Tag, directive: &Directive, ctx: &mut Context<'_>) {
    let Some(value) = tag.value(&directive.attribute) else {
        return;
    };
    if value.trim() != "false" {
        let classes = ctx.classes(&[COLLAPSE_CLASS], directive.breakpoint());
        tag.add_classes(classes);
    }
    tag.remove_attribute(&directive.attribute);
}

/// Rewrite `[fxHide]="expr"` bindings into one `[ngClass]` object literal.
///
/// `[fxHide]="open" [fxHide.xs]="true"` becomes
/// `[ngClass]="{ 'hidden': open, 'xs:hidden': true }"`. Expressions are copied
/// verbatim, without escaping quotes.
pub(super) fn convert_bound_hides(tag: &mut Tag, directives: &[Directive], ctx: &mut Context<'_>) {
    let bound: Vec<&Directive> = directives
        .iter()
        .filter(|d| d.kind == DirectiveKind::BoundHide)
        .collect();
    if bound.is_empty() {
        return;
    }

    if tag.has_attribute(BOUND_CLASS_ATTRIBUTE) {
        for directive in bound {
            let value = tag.value(&directive.attribute).unwrap_or_default().to_owned();
            ctx.skip(directive, &value, format!("tag already has {BOUND_CLASS_ATTRIBUTE}"));
        }
        return;
    }

    let mut entries = Vec::new();
    let mut converted = Vec::new();
    for directive in bound {
        let Some(expression) = tag.value(&directive.attribute).map(str::trim) else {
            continue;
        };
        if expression.is_empty() {
            ctx.skip(directive, expression, "empty binding expression");
            continue;
        }
        let class = ctx.builder.token(COLLAPSE_CLASS, directive.breakpoint());
        entries.push(format!("'{class}': {expression}"));
        converted.push(directive.attribute.as_str());
    }

    if entries.is_empty() {
        return;
    }
    tag.set_attribute(BOUND_CLASS_ATTRIBUTE, &format!("{{ {} }}", entries.join(", ")));
    for attribute in converted {
        tag.remove_attribute(attribute);
    }
}
