//! `fxLayout`, `fxLayoutGap` and `fxLayoutAlign`.

use super::{Context, format_number, parse_number};
use crate::directive::{Directive, DirectiveKind};
use crate::tag::Tag;

const DEFAULT_DIRECTION: &str = "column";

/// Classes produced by one layout-family declaration.
#[derive(Debug, Default, PartialEq, Eq)]
struct LayoutClasses {
    tokens: Vec<&'static str>,
    /// Dynamic tokens such as `gap-4`.
    owned: Vec<String>,
    inline: bool,
}

impl LayoutClasses {
    fn tokens(tokens: Vec<&'static str>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }
}

/// Convert every `fxLayout*` declaration on the tag, then ensure `flex`.
///
/// `flex` is added only when at least one declaration converted, and goes first
/// in the emitted class list. An `inline` modifier without a breakpoint drops a
/// `flex` already on the tag before the family's classes are merged.
pub(super) fn convert_layout_group(tag: &mut Tag, directives: &[Directive], ctx: &mut Context<'_>) {
    let group: Vec<&Directive> = directives.iter().filter(|d| d.kind.is_layout()).collect();
    if group.is_empty() {
        return;
    }

    // Gap needs the paired direction, so read layouts before anything is removed.
    let directions: Vec<(Option<&str>, String)> = group
        .iter()
        .filter(|d| d.kind == DirectiveKind::Layout)
        .map(|d| {
            let value = tag.value(&d.attribute).unwrap_or_default();
            let direction = value.split_whitespace().next().unwrap_or(DEFAULT_DIRECTION);
            (d.breakpoint(), direction.to_owned())
        })
        .collect();

    let mut classes = Vec::new();
    let mut converted = false;
    let mut inline = false;

    for directive in group {
        let value = tag.value(&directive.attribute).unwrap_or_default().to_owned();
        let result = match directive.kind {
            DirectiveKind::Layout => layout_classes(&value).map(Some),
            DirectiveKind::LayoutGap => {
                gap_classes(&value, paired_direction(&directions, directive.breakpoint()))
            }
            DirectiveKind::LayoutAlign => align_classes(&value),
            _ => continue,
        };

        match result {
            Ok(Some(layout)) => {
                let breakpoint = directive.breakpoint();
                classes.extend(ctx.classes(&layout.tokens, breakpoint));
                for token in &layout.owned {
                    classes.extend(ctx.classes(&[token.as_str()], breakpoint));
                }
                inline |= layout.inline && breakpoint.is_none();
                tag.remove_attribute(&directive.attribute);
                converted = true;
            }
            Ok(None) => {}
            Err(message) => ctx.skip(directive, &value, message),
        }
    }

    if !converted {
        return;
    }

    let flex = ctx.builder.token("flex", None);
    if inline {
        tag.remove_class(&flex);
    }
    classes.insert(0, flex);
    tag.add_classes(classes);
}

fn paired_direction<'a>(directions: &'a [(Option<&str>, String)], breakpoint: Option<&str>) -> &'a str {
    directions
        .iter()
        .find(|(bp, _)| *bp == breakpoint)
        .or_else(|| directions.iter().find(|(bp, _)| bp.is_none()))
        .map_or(DEFAULT_DIRECTION, |(_, direction)| direction.as_str())
}

/// `fxLayout="<direction> [modifiers]"`.
fn layout_classes(value: &str) -> Result<LayoutClasses, String> {
    let mut parts = value.split_whitespace();
    let direction = parts.next().unwrap_or(DEFAULT_DIRECTION);

    let class = match direction {
        "row" => "flex-row",
        "column" => "flex-col",
        "row-reverse" => "flex-row-reverse",
        "column-reverse" => "flex-col-reverse",
        other => return Err(format!("unknown layout direction '{other}'")),
    };

    let mut layout = LayoutClasses::tokens(vec![class]);
    for modifier in parts {
        match modifier {
            "wrap" => layout.tokens.push("flex-wrap"),
            "inline" => {
                layout.tokens.push("inline-flex");
                layout.inline = true;
            }
            other => tracing::debug!(modifier = other, "Ignoring layout modifier"),
        }
    }
    Ok(layout)
}

/// `fxLayoutGap="<px>"`, converted to the 4px spacing scale, rounding up.
///
/// An empty value is left alone.
fn gap_classes(value: &str, direction: &str) -> Result<Option<LayoutClasses>, String> {
    let Some(length) = value.split_whitespace().next() else {
        return Ok(None);
    };

    let number = length.strip_suffix("px").unwrap_or(length);
    let Some(pixels) = parse_number(number) else {
        return Err(format!("gap '{length}' is not a pixel length"));
    };

    let spacing = format_number((pixels / 4.0).ceil());
    let class = if direction == "row" {
        format!("gap-x-{spacing}")
    } else {
        format!("gap-{spacing}")
    };

    Ok(Some(LayoutClasses {
        owned: vec![class],
        ..LayoutClasses::default()
    }))
}

fn main_axis_class(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "start" | "flex-start" => "justify-start",
        "center" => "justify-center",
        "end" | "flex-end" => "justify-end",
        "space-around" => "justify-around",
        "space-between" => "justify-between",
        "space-evenly" => "justify-evenly",
        _ => return None,
    })
}

fn cross_axis_class(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "start" | "flex-start" => "items-start",
        "center" => "items-center",
        "end" | "flex-end" => "items-end",
        "baseline" => "items-baseline",
        "stretch" => "items-stretch",
        _ => return None,
    })
}

/// `fxLayoutAlign="<main> [cross]"`.
///
/// A main axis of `start` is the default and is never emitted.
fn align_classes(value: &str) -> Result<Option<LayoutClasses>, String> {
    let mut parts = value.split_whitespace();
    let Some(main) = parts.next() else {
        return Ok(None);
    };
    let cross = parts.next();

    let main_class =
        main_axis_class(main).ok_or_else(|| format!("unknown main axis alignment '{main}'"))?;
    let cross_class = cross
        .map(|c| cross_axis_class(c).ok_or_else(|| format!("unknown cross axis alignment '{c}'")))
        .transpose()?;

    let tokens = if main != "start" && cross != Some("start") {
        [Some(main_class), cross_class].into_iter().flatten().collect()
    } else if main != "start" {
        vec![main_class]
    } else {
        cross_class.into_iter().collect()
    };

    Ok(Some(LayoutClasses::tokens(tokens)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::ClassBuilder;
    use crate::directive::classify;
    use pretty_assertions::assert_eq;

    fn convert(text: &str) -> String {
        convert_with(text, &ClassBuilder::default()).0
    }

    fn convert_with(text: &str, builder: &ClassBuilder) -> (String, usize) {
        let mut tag = Tag::parse(text).unwrap();
        let directives: Vec<_> = tag.attributes().filter_map(|a| classify(a.name())).collect();
        let mut ctx = Context::new(builder);
        convert_layout_group(&mut tag, &directives, &mut ctx);
        (tag.render(), ctx.into_diagnostics().len())
    }

    #[test]
    fn test_directions() {
        assert_eq!(convert(r#"<div fxLayout="row">"#), r#"<div class="flex flex-row">"#);
        assert_eq!(convert(r#"<div fxLayout="column">"#), r#"<div class="flex flex-col">"#);
        assert_eq!(
            convert(r#"<div fxLayout="row-reverse">"#),
            r#"<div class="flex flex-row-reverse">"#
        );
        assert_eq!(
            convert(r#"<div fxLayout="column-reverse">"#),
            r#"<div class="flex flex-col-reverse">"#
        );
    }

    #[test]
    fn test_empty_layout_defaults_to_column() {
        assert_eq!(convert("<div fxLayout>"), r#"<div class="flex flex-col">"#);
    }

    #[test]
    fn test_wrap_modifier() {
        assert_eq!(
            convert(r#"<div fxLayout="row wrap">"#),
            r#"<div class="flex flex-row flex-wrap">"#
        );
    }

    #[test]
    fn test_inline_modifier_keeps_flex() {
        assert_eq!(
            convert(r#"<div fxLayout="row inline">"#),
            r#"<div class="flex flex-row inline-flex">"#
        );
    }

    #[test]
    fn test_inline_modifier_reorders_existing_flex() {
        assert_eq!(
            convert(r#"<span class="card flex" fxLayout="column inline">"#),
            r#"<span class="card flex flex-col inline-flex">"#
        );
        assert_eq!(
            convert(r#"<span class="flex card" fxLayout="row inline">"#),
            r#"<span class="card flex flex-row inline-flex">"#
        );
    }

    #[test]
    fn test_unknown_direction_left_alone() {
        let (html, diagnostics) =
            convert_with(r#"<div fxLayout="diagonal">"#, &ClassBuilder::default());
        assert_eq!(html, r#"<div fxLayout="diagonal">"#);
        assert_eq!(diagnostics, 1);
    }

    #[test]
    fn test_unknown_direction_does_not_block_align() {
        assert_eq!(
            convert(r#"<div fxLayout="diagonal" fxLayoutAlign="center center">"#),
            r#"<div fxLayout="diagonal" class="flex justify-center items-center">"#
        );
    }

    #[test]
    fn test_row_gap_uses_x_axis() {
        assert_eq!(
            convert(r#"<div fxLayout="row" fxLayoutGap="16px">"#),
            r#"<div class="flex flex-row gap-x-4">"#
        );
    }

    #[test]
    fn test_gap_without_layout_is_column() {
        assert_eq!(
            convert(r#"<div fxLayoutGap="10px">"#),
            r#"<div class="flex gap-3">"#
        );
    }

    #[test]
    fn test_gap_rounds_up() {
        assert_eq!(
            convert(r#"<div fxLayout="column" fxLayoutGap="5px">"#),
            r#"<div class="flex flex-col gap-2">"#
        );
    }

    #[test]
    fn test_gap_unitless_and_grid_suffix() {
        assert_eq!(
            convert(r#"<div fxLayout="row" fxLayoutGap="8 grid">"#),
            r#"<div class="flex flex-row gap-x-2">"#
        );
    }

    #[test]
    fn test_gap_empty_is_noop() {
        assert_eq!(convert("<div fxLayoutGap>"), "<div fxLayoutGap>");
    }

    #[test]
    fn test_gap_non_pixel_value_left_alone() {
        let (html, diagnostics) =
            convert_with(r#"<div fxLayoutGap="1rem">"#, &ClassBuilder::default());
        assert_eq!(html, r#"<div fxLayoutGap="1rem">"#);
        assert_eq!(diagnostics, 1);
    }

    #[test]
    fn test_gap_pairs_with_breakpoint_layout() {
        assert_eq!(
            convert(
                r#"<div fxLayout="column" fxLayout.gt-sm="row" fxLayoutGap.gt-sm="24px">"#
            ),
            r#"<div class="flex flex-col gt-sm:flex-row gt-sm:gap-x-6">"#
        );
    }

    #[test]
    fn test_gap_breakpoint_falls_back_to_base_layout() {
        assert_eq!(
            convert(r#"<div fxLayout="row" fxLayoutGap.xs="4px">"#),
            r#"<div class="flex flex-row xs:gap-x-1">"#
        );
    }

    #[test]
    fn test_align_start_main_is_suppressed() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="start center">"#),
            r#"<div class="flex items-center">"#
        );
    }

    #[test]
    fn test_align_both_axes() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="space-between end">"#),
            r#"<div class="flex justify-between items-end">"#
        );
    }

    #[test]
    fn test_align_cross_start_wins() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="center start">"#),
            r#"<div class="flex justify-center">"#
        );
    }

    #[test]
    fn test_align_start_start() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="start start">"#),
            r#"<div class="flex items-start">"#
        );
    }

    #[test]
    fn test_align_main_only() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="flex-end">"#),
            r#"<div class="flex justify-end">"#
        );
    }

    #[test]
    fn test_align_flex_keywords() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="space-evenly flex-end">"#),
            r#"<div class="flex justify-evenly items-end">"#
        );
    }

    #[test]
    fn test_align_unknown_keyword_left_alone() {
        assert_eq!(
            convert(r#"<div fxLayoutAlign="middle center">"#),
            r#"<div fxLayoutAlign="middle center">"#
        );
        assert_eq!(
            convert(r#"<div fxLayoutAlign="center sideways">"#),
            r#"<div fxLayoutAlign="center sideways">"#
        );
    }

    #[test]
    fn test_prefix_applies_to_flex() {
        let builder = ClassBuilder::new("tw");
        let (html, _) = convert_with(r#"<div fxLayout="row" class="tw-flex">"#, &builder);
        assert_eq!(html, r#"<div class="tw-flex tw-flex-row">"#);
    }

    #[test]
    fn test_breakpoint_inline_keeps_flex() {
        assert_eq!(
            convert(r#"<div fxLayout="row" fxLayout.xs="column inline">"#),
            r#"<div class="flex flex-row xs:flex-col xs:inline-flex">"#
        );
    }

    #[test]
    fn test_paired_direction() {
        let directions = vec![(None, "row".to_owned()), (Some("xs"), "column".to_owned())];
        assert_eq!(paired_direction(&directions, Some("xs")), "column");
        assert_eq!(paired_direction(&directions, Some("md")), "row");
        assert_eq!(paired_direction(&[], None), "column");
    }
}
