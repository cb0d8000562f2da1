//! Conversion diagnostics.

use std::fmt;

/// A directive that could not be converted and was left on its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line of the tag in the source document (0 when unknown).
    pub line: usize,
    /// Attribute name as written (e.g. `fxLayout.gt-sm`).
    pub attribute: String,
    pub value: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: ", self.line)?;
        }
        write!(f, "{}=\"{}\": {}", self.attribute, self.value, self.message)
    }
}
