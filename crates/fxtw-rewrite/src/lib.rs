//! Flex-Layout directive to utility class rewriter.
//!
//! This crate rewrites the Angular Flex-Layout attribute vocabulary (`fxLayout`,
//! `fxFlex`, `fxLayoutAlign`, `fxLayoutGap`, `fxFill`, `fxHide`, ...) found in
//! HTML templates into utility classes, touching only the tags that carry a
//! directive.
//!
//! # Architecture
//!
//! - [`extract_tags`]: finds tag spans in raw HTML without building a tree
//! - [`Tag`]: attribute view over one tag, rendered back after mutation
//! - [`directive::classify`]: maps attribute names to directive families
//! - converters: one per family, adding classes and removing the directive
//! - [`ClassBuilder`]: class prefix and breakpoint variant formatting
//! - [`Rewriter`]: whole-document pass splicing converted tags back
//!
//! # Example
//!
//! ```
//! use fxtw_rewrite::Rewriter;
//!
//! let rewriter = Rewriter::with_prefix("tw");
//! let result = rewriter.rewrite(r#"<main fxLayout="column" fxLayoutAlign="center center">"#);
//! assert_eq!(
//!     result.html,
//!     r#"<main class="tw-flex tw-flex-col tw-justify-center tw-items-center">"#
//! );
//! ```

mod classes;
mod convert;
mod diagnostic;
pub mod directive;
mod extract;
mod rewriter;
mod tag;

pub use classes::ClassBuilder;
pub use diagnostic::Diagnostic;
pub use directive::{Directive, DirectiveKind};
pub use extract::{TagSpan, extract_tags};
pub use rewriter::{Rewrite, Rewriter};
pub use tag::{Attribute, Tag};
