//! `fxFlex` value grammar.
//!
//! Branches are tried in order and the first match wins:
//!
//! | value                    | classes                                  |
//! |--------------------------|------------------------------------------|
//! | empty                    | `flex-1`                                 |
//! | `auto`                   | `flex-auto`                              |
//! | `calc(...)`              | `w-[calc(...)]`                          |
//! | `<g> <s> calc(...)`      | `grow-<g> shrink-<s> basis-[calc(...)]`  |
//! | `<p>%`                   | `basis-<fraction>`                       |
//! | `<g> <s> <p>%`           | `grow-<g> shrink-<s> basis-<fraction>`   |
//! | `<n>px`                  | `w-<n/4>` or `w-[<n>px]`                 |
//! | `row`                    | `flex-1`                                 |
//! | `<g> <s> <basis>`        | `grow-<g> shrink-<s> basis-<basis>`      |

use super::{Context, arbitrary, format_number, parse_number};
use crate::directive::Directive;
use crate::tag::Tag;

pub(super) fn convert_flex(tag: &mut Tag, directive: &Directive, ctx: &mut Context<'_>) {
    let Some(value) = tag.value(&directive.attribute) else {
        return;
    };
    let value = value.trim().to_owned();

    match flex_classes(&value) {
        Ok(tokens) => {
            let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
            let classes = ctx.classes(&tokens, directive.breakpoint());
            tag.add_classes(classes);
            tag.remove_attribute(&directive.attribute);
        }
        Err(message) => ctx.skip(directive, &value, message),
    }
}

fn flex_classes(value: &str) -> Result<Vec<String>, String> {
    if value.is_empty() {
        return Ok(vec!["flex-1".to_owned()]);
    }
    if value == "auto" {
        return Ok(vec!["flex-auto".to_owned()]);
    }

    if value.contains("calc") {
        if value.starts_with("calc") {
            return Ok(vec![format!("w-{}", arbitrary(value))]);
        }
        return triplet_classes(value);
    }

    if value.ends_with('%') {
        return if is_compound(value) {
            triplet_classes(value)
        } else {
            Ok(vec![format!("basis-{}", percentage_fraction(value)?)])
        };
    }

    if value.ends_with("px") {
        return if is_compound(value) {
            triplet_classes(value)
        } else {
            Ok(vec![pixel_class("w", value)?])
        };
    }

    if value == "row" {
        return Ok(vec!["flex-1".to_owned()]);
    }

    if is_compound(value) {
        return triplet_classes(value);
    }

    Err("unsupported flex value".to_owned())
}

fn is_compound(value: &str) -> bool {
    value.contains(char::is_whitespace)
}

/// Split `<grow> <shrink> <basis>`; the basis keeps any inner whitespace.
fn split_triplet(value: &str) -> Option<(&str, &str, &str)> {
    let (grow, rest) = value.split_once(char::is_whitespace)?;
    let (shrink, basis) = rest.trim_start().split_once(char::is_whitespace)?;
    let basis = basis.trim();
    (!basis.is_empty()).then_some((grow, shrink, basis))
}

fn triplet_classes(value: &str) -> Result<Vec<String>, String> {
    let (grow, shrink, basis) =
        split_triplet(value).ok_or_else(|| "expected '<grow> <shrink> <basis>'".to_owned())?;

    for factor in [grow, shrink] {
        if parse_number(factor).is_none() {
            return Err(format!("flex factor '{factor}' is not a number"));
        }
    }

    let basis = if basis.starts_with("calc") {
        arbitrary(basis)
    } else if basis.ends_with('%') {
        percentage_fraction(basis)?
    } else if basis.ends_with("px") {
        return Ok(vec![
            format!("grow-{grow}"),
            format!("shrink-{shrink}"),
            pixel_class("basis", basis)?,
        ]);
    } else if basis.contains(char::is_whitespace) || basis.contains("calc") {
        return Err(format!("unsupported flex basis '{basis}'"));
    } else {
        basis.to_owned()
    };

    Ok(vec![
        format!("grow-{grow}"),
        format!("shrink-{shrink}"),
        format!("basis-{basis}"),
    ])
}

/// `33%` -> `1/3`, `66%` -> `2/3`, `100%` -> `full`, otherwise `p/100` in
/// lowest terms.
fn percentage_fraction(value: &str) -> Result<String, String> {
    let number = value.strip_suffix('%').unwrap_or(value).trim();
    let percentage: u32 = number
        .parse()
        .map_err(|_| format!("percentage '{value}' is not a whole number"))?;

    Ok(match percentage {
        0 => "0".to_owned(),
        33 => "1/3".to_owned(),
        66 => "2/3".to_owned(),
        100 => "full".to_owned(),
        p if p < 100 => {
            let divisor = gcd(p, 100);
            format!("{}/{}", p / divisor, 100 / divisor)
        }
        _ => return Err(format!("percentage '{value}' exceeds 100%")),
    })
}

/// Pixel length on the 4px spacing scale, or an arbitrary value off the scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_class(utility: &str, value: &str) -> Result<String, String> {
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    let pixels =
        parse_number(number).ok_or_else(|| format!("length '{value}' is not a number"))?;

    if pixels.fract() == 0.0 && (pixels as u64) % 4 == 0 {
        Ok(format!("{utility}-{}", format_number(pixels / 4.0)))
    } else {
        Ok(format!("{utility}-[{}px]", format_number(pixels)))
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}
