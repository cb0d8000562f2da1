//! Whole-document rewriting.

use std::sync::LazyLock;

use regex::Regex;

use crate::classes::ClassBuilder;
use crate::convert::{Context, convert_tag};
use crate::diagnostic::Diagnostic;
use crate::directive::mentions_directive;
use crate::extract::extract_tags;
use crate::tag::Tag;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Result of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Rewritten document text.
    pub html: String,
    /// Number of tags that changed.
    pub converted_tags: usize,
    /// Directives left unconverted.
    pub diagnostics: Vec<Diagnostic>,
}

impl Rewrite {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.converted_tags > 0
    }
}

/// Rewrites Flex-Layout directives in HTML documents into utility classes.
///
/// # Example
///
/// ```
/// use fxtw_rewrite::Rewriter;
///
/// let rewriter = Rewriter::default();
/// let result = rewriter.rewrite(r#"<div fxLayout="row" fxLayoutGap="16px"><span fxFlex></span></div>"#);
/// assert_eq!(
///     result.html,
///     r#"<div class="flex flex-row gap-x-4"><span class="flex-1"></span></div>"#
/// );
/// assert_eq!(result.converted_tags, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    builder: ClassBuilder,
}

impl Rewriter {
    #[must_use]
    pub fn new(builder: ClassBuilder) -> Self {
        Self { builder }
    }

    /// Create a rewriter emitting classes with `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self::new(ClassBuilder::new(prefix))
    }

    #[must_use]
    pub fn builder(&self) -> &ClassBuilder {
        &self.builder
    }

    /// Rewrite every tag carrying a directive.
    ///
    /// Tags are located on a comment-free copy of the document and mapped back
    /// to their own position in the original, so each converted tag replaces
    /// exactly the span it was extracted from. Everything else is copied
    /// unchanged.
    #[must_use]
    pub fn rewrite(&self, html: &str) -> Rewrite {
        let stripped = COMMENT_RE.replace_all(html, "");
        let offsets = OffsetMap::new(html);

        let mut output = String::with_capacity(html.len());
        let mut cursor = 0;
        let mut line = 1;
        let mut line_from = 0;
        let mut converted_tags = 0;
        let mut diagnostics = Vec::new();

        for span in extract_tags(&stripped) {
            if !mentions_directive(span.text) {
                continue;
            }
            let position = offsets.original(span.offset);
            if html.get(position..position + span.text.len()) != Some(span.text) {
                tracing::debug!(tag = span.text, "Tag encloses a comment, skipping");
                continue;
            }

            line += html[line_from..position].matches('\n').count();
            line_from = position;

            let (converted, tag_diagnostics) = self.rewrite_tag(span.text);
            diagnostics.extend(tag_diagnostics.into_iter().map(|d| Diagnostic { line, ..d }));

            if let Some(converted) = converted {
                output.push_str(&html[cursor..position]);
                output.push_str(&converted);
                cursor = position + span.text.len();
                converted_tags += 1;
            }
        }
        output.push_str(&html[cursor..]);

        Rewrite {
            html: output,
            converted_tags,
            diagnostics,
        }
    }

    /// Rewrite a single tag.
    ///
    /// Returns `None` in the first position when the tag is malformed or no
    /// directive on it could be converted.
    #[must_use]
    pub fn rewrite_tag(&self, text: &str) -> (Option<String>, Vec<Diagnostic>) {
        let Some(mut tag) = Tag::parse(text) else {
            tracing::debug!(tag = text, "Skipping malformed tag");
            return (None, Vec::new());
        };

        let mut ctx = Context::new(&self.builder);
        convert_tag(&mut tag, &mut ctx);
        let diagnostics = ctx.into_diagnostics();

        let converted = tag.is_modified().then(|| tag.render());
        (converted, diagnostics)
    }
}

/// Maps offsets in the comment-free copy of a document back to the original.
struct OffsetMap {
    /// `(offset in the copy, bytes removed up to and including this comment)`.
    cuts: Vec<(usize, usize)>,
}

impl OffsetMap {
    fn new(html: &str) -> Self {
        let mut removed = 0;
        let cuts = COMMENT_RE
            .find_iter(html)
            .map(|m| {
                let at = m.start() - removed;
                removed += m.len();
                (at, removed)
            })
            .collect();
        Self { cuts }
    }

    fn original(&self, offset: usize) -> usize {
        let index = self.cuts.partition_point(|(at, _)| *at <= offset);
        offset + index.checked_sub(1).map_or(0, |i| self.cuts[i].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite(html: &str) -> String {
        Rewriter::default().rewrite(html).html
    }

    #[test]
    fn test_identity_without_directives() {
        let html = "<!DOCTYPE html>\n<html>\n<body class=\"x\">\n  <p title='a > b'>Hi</p>\n</body>\n</html>\n";
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn test_layout_and_gap() {
        assert_eq!(
            rewrite(r#"<div fxLayout="row" fxLayoutGap="16px">"#),
            r#"<div class="flex flex-row gap-x-4">"#
        );
    }

    #[test]
    fn test_align_start_suppressed() {
        assert_eq!(
            rewrite(r#"<div fxLayoutAlign="start center">"#),
            r#"<div class="flex items-center">"#
        );
    }

    #[test]
    fn test_flex_fraction() {
        assert_eq!(rewrite(r#"<div fxFlex="33%">"#), r#"<div class="basis-1/3">"#);
        assert_eq!(
            rewrite(r#"<div fxFlex.lt-lg="50%">"#),
            r#"<div class="lt-lg:basis-1/2">"#
        );
    }

    #[test]
    fn test_fill() {
        assert_eq!(
            rewrite("<div fxFill>"),
            r#"<div class="h-full w-full min-h-full min-w-full">"#
        );
    }

    #[test]
    fn test_unknown_layout_kept() {
        let result = Rewriter::default().rewrite(r#"<div fxLayout="diagonal">"#);
        assert_eq!(result.html, r#"<div fxLayout="diagonal">"#);
        assert!(!result.is_changed());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 1);
    }

    #[test]
    fn test_document_context_preserved() {
        let html = "<section>\n  <div fxLayout=\"column\" id=\"main\">\n    text fxFlex\n  </div>\n</section>\n";
        assert_eq!(
            rewrite(html),
            "<section>\n  <div id=\"main\" class=\"flex flex-col\">\n    text fxFlex\n  </div>\n</section>\n"
        );
    }

    #[test]
    fn test_identical_tags_each_converted() {
        assert_eq!(
            rewrite("<i fxFlex></i><i fxFlex></i>"),
            r#"<i class="flex-1"></i><i class="flex-1"></i>"#
        );
    }

    #[test]
    fn test_commented_tag_untouched() {
        assert_eq!(
            rewrite("<!-- <div fxFill> -->\n<div fxFill>"),
            "<!-- <div fxFill> -->\n<div class=\"h-full w-full min-h-full min-w-full\">"
        );
    }

    #[test]
    fn test_self_closing_preserved() {
        assert_eq!(
            rewrite(r#"<app-spacer fxFlex="auto" />"#),
            r#"<app-spacer class="flex-auto" />"#
        );
        assert_eq!(
            rewrite(r#"<img fxFlex="16px">"#),
            r#"<img class="w-4">"#
        );
    }

    #[test]
    fn test_prefix() {
        let rewriter = Rewriter::with_prefix("tw");
        assert_eq!(
            rewriter.rewrite(r#"<div fxLayout="row" fxFlex="25%">"#).html,
            r#"<div class="tw-flex tw-flex-row tw-basis-1/4">"#
        );
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<div fxLayout="row wrap" fxLayoutAlign="center center" fxLayoutGap="8px">
  <div fxFlex="50%" fxFlex.lt-md="100%" [fxHide.xs]="compact"></div>
  <div fxFlex fxLayout="diagonal"></div>
  <span fxFlex="weird"></span>
  <img fxFill src="a.png"/>
</div>"#;
        let once = rewrite(html);
        assert_ne!(once, html);
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn test_diagnostic_lines() {
        let html = "<p>\n</p>\n<div fxFlex=\"abc%\">";
        let result = Rewriter::default().rewrite(html);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 3);
        assert_eq!(result.diagnostics[0].attribute, "fxFlex");
    }

    #[test]
    fn test_directive_name_in_value_only() {
        let html = r#"<a title="uses fxFlex">"#;
        let result = Rewriter::default().rewrite(html);
        assert_eq!(result.html, html);
        assert_eq!(result.converted_tags, 0);
    }

    #[test]
    fn test_unterminated_trailing_tag() {
        let html = r#"<div fxFill></div><div fxFlex="50%""#;
        assert_eq!(
            rewrite(html),
            r#"<div class="h-full w-full min-h-full min-w-full"></div><div fxFlex="50%""#
        );
    }

    #[test]
    fn test_tag_text_inside_attribute_value() {
        let html = "<a title='<b fxFill>'></a><b fxFill>";
        let once = rewrite(html);
        assert_eq!(
            once,
            "<a title='<b fxFill>'></a><b class=\"h-full w-full min-h-full min-w-full\">"
        );
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn test_tag_after_comments() {
        let html = "<!-- a --><i fxFlex></i>\n<!-- <i fxFlex> -->\n<i fxFlex=\"auto\"></i>";
        let result = Rewriter::default().rewrite(html);
        assert_eq!(
            result.html,
            "<!-- a --><i class=\"flex-1\"></i>\n<!-- <i fxFlex> -->\n<i class=\"flex-auto\"></i>"
        );
        assert_eq!(result.converted_tags, 2);
    }

    #[test]
    fn test_diagnostic_lines_in_order() {
        let html = "<i fxFlex=\"x\"></i>\n\n<i fxFlex=\"y\"></i>\n<i fxLayout=\"z\"></i>";
        let lines: Vec<_> = Rewriter::default()
            .rewrite(html)
            .diagnostics
            .iter()
            .map(|d| d.line)
            .collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn test_offset_map() {
        let html = "ab<!--x-->cd<!---->e";
        let offsets = OffsetMap::new(html);
        // copy is "abcde"
        assert_eq!(offsets.original(0), 0);
        assert_eq!(offsets.original(2), 10);
        assert_eq!(offsets.original(4), 19);
    }
}
