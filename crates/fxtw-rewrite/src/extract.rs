//! Tag span extraction.
//!
//! Isolates complete tags (`<name ...>`, `<name .../>`, `</name>`) from raw
//! HTML in a single forward scan, without building a document tree. Quoted
//! attribute values may contain `>` and the other quote character; comments and
//! markup declarations outside of tags are skipped.

/// One complete tag found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan<'a> {
    /// Byte offset of the opening `<`.
    pub offset: usize,
    /// Tag text from `<` to `>` inclusive.
    pub text: &'a str,
}

impl TagSpan<'_> {
    /// Byte offset one past the closing `>`.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    /// `<!-- ... -->`
    Comment,
    /// `<!DOCTYPE ...>` and other `<!` declarations.
    Declaration,
    InTag { start: usize },
    Quoted { start: usize, quote: u8 },
}

/// Extract all complete tags from `html`, in document order.
///
/// A tag left unterminated at the end of input produces no span.
///
/// # Example
///
/// ```
/// use fxtw_rewrite::extract_tags;
///
/// let spans = extract_tags(r#"<div title="a > b"><!-- <p> --><br/>"#);
/// let texts: Vec<_> = spans.iter().map(|s| s.text).collect();
/// assert_eq!(texts, vec![r#"<div title="a > b">"#, "<br/>"]);
/// ```
#[must_use]
pub fn extract_tags(html: &str) -> Vec<TagSpan<'_>> {
    let bytes = html.as_bytes();
    let mut spans = Vec::new();
    let mut state = State::Outside;
    let mut i = 0;

    // Every delimiter is ASCII, so byte offsets at delimiters are char boundaries.
    while i < bytes.len() {
        let ch = bytes[i];
        match state {
            State::Outside => {
                if ch == b'<' {
                    if bytes.get(i + 1) == Some(&b'!') {
                        if bytes[i..].starts_with(b"<!--") {
                            state = State::Comment;
                            i += 4;
                        } else {
                            state = State::Declaration;
                            i += 2;
                        }
                        continue;
                    }
                    // A `<` not followed by a name or `/` is text (`a < b`)
                    if bytes
                        .get(i + 1)
                        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/')
                    {
                        state = State::InTag { start: i };
                    }
                }
            }
            State::Comment => {
                if bytes[i..].starts_with(b"-->") {
                    state = State::Outside;
                    i += 3;
                    continue;
                }
            }
            State::Declaration => {
                if ch == b'>' {
                    state = State::Outside;
                }
            }
            State::InTag { start } => match ch {
                b'"' | b'\'' => state = State::Quoted { start, quote: ch },
                b'>' => {
                    spans.push(TagSpan {
                        offset: start,
                        text: &html[start..=i],
                    });
                    state = State::Outside;
                }
                _ => {}
            },
            State::Quoted { start, quote } => {
                if ch == quote {
                    state = State::InTag { start };
                }
            }
        }
        i += 1;
    }

    spans
}
