//! Filesystem access for fxtw.
//!
//! [`Scanner`] walks traversal roots and collects HTML templates in a stable
//! order. [`Document`] reads a template and writes its replacement atomically.

mod document;
mod scanner;

pub use document::{Document, FsError};
pub use scanner::Scanner;
