//! Attribute view over a single tag.
//!
//! [`Tag`] parses one opening tag into an ordered attribute list, supports
//! queries and mutations scoped to that tag, and renders it back to text.
//! Attributes that are never touched keep their original text, including the
//! whitespace before them and their quoting style.

/// One `name[=value]` declaration on a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: Option<String>,
    /// Whitespace preceding the declaration.
    lead: String,
    /// Original declaration text, cleared once the attribute is mutated.
    raw: Option<String>,
    quote: Option<char>,
}

impl Attribute {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: Some(value.to_owned()),
            lead: " ".to_owned(),
            raw: None,
            quote: None,
        }
    }

    /// Attribute name as written (e.g. `fxFlex.lt-lg`, `[fxHide]`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value; `None` for a bare attribute.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_value(&mut self, value: String) {
        self.value = Some(value);
        self.raw = None;
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&self.lead);
        if let Some(raw) = &self.raw {
            out.push_str(raw);
            return;
        }
        out.push_str(&self.name);
        match self.value.as_deref() {
            None | Some("") => {}
            Some(value) => {
                let quote = match self.quote {
                    Some(q) if !value.contains(q) => q,
                    _ if value.contains('"') => '\'',
                    _ => '"',
                };
                out.push('=');
                out.push(quote);
                out.push_str(value);
                out.push(quote);
            }
        }
    }
}

/// Parsed opening tag with mutable attributes.
///
/// # Example
///
/// ```
/// use fxtw_rewrite::Tag;
///
/// let mut tag = Tag::parse(r#"<div id="main" fxFill>"#).unwrap();
/// tag.remove_attribute("fxFill");
/// tag.add_classes(["h-full w-full"]);
/// assert_eq!(tag.render(), r#"<div id="main" class="h-full w-full">"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Vec<Attribute>,
    /// Whitespace between the last attribute and `>` / `/>`.
    tail: String,
    self_closing: bool,
    modified: bool,
}

impl Tag {
    /// Parse an opening tag.
    ///
    /// Returns `None` for closing tags, declarations, and malformed input
    /// (missing delimiters, unterminated quoted values).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.strip_prefix('<')?.strip_suffix('>')?;
        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (inner, false),
        };

        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let mut attributes = Vec::new();
        let mut rest = &inner[name_end..];
        loop {
            let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
            if trimmed.is_empty() {
                break;
            }
            let lead = &rest[..rest.len() - trimmed.len()];
            let (attribute, remaining) = parse_attribute(lead, trimmed)?;
            attributes.push(attribute);
            rest = remaining;
        }

        Some(Self {
            name: name.to_owned(),
            attributes,
            tail: rest.to_owned(),
            self_closing,
            modified: false,
        })
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the tag was written as `<name ... />`.
    #[must_use]
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Whether any mutation changed the tag since parsing.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    fn find(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.name == name)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[must_use]
    pub fn has_attribute_with_prefix(&self, prefix: &str) -> bool {
        self.attributes.iter().any(|a| a.name.starts_with(prefix))
    }

    /// Names of attributes starting with `prefix`, in document order.
    #[must_use]
    pub fn attributes_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|a| a.name.starts_with(prefix))
            .map(|a| a.name.clone())
            .collect()
    }

    /// Value of `name`: `None` when absent, `Some("")` for a bare attribute.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.find(name).map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Set `name` to `value`, appending the attribute if it is absent.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(attribute) = self.find_mut(name) {
            if attribute.value.as_deref() == Some(value) {
                return;
            }
            attribute.set_value(value.to_owned());
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
        self.modified = true;
    }

    /// Remove every declaration named `name`.
    pub fn remove_attribute(&mut self, name: &str) {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name != name);
        if self.attributes.len() != before {
            self.modified = true;
        }
    }

    /// Class tokens of the `class` attribute, in order.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.value("class")
            .map(|v| v.split_whitespace().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.classes().contains(&token)
    }

    /// Merge class strings into the `class` attribute.
    ///
    /// Each item may hold several space-separated tokens. Tokens already present
    /// are skipped. A missing `class` attribute is appended after the others.
    pub fn add_classes<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = self.classes().into_iter().map(str::to_owned).collect();
        let mut added = false;
        for item in items {
            for token in item.as_ref().split_whitespace() {
                if !classes.iter().any(|c| c == token) {
                    classes.push(token.to_owned());
                    added = true;
                }
            }
        }
        if added {
            self.set_attribute("class", &classes.join(" "));
        }
    }

    /// Remove a class token; a no-op when it is absent.
    pub fn remove_class(&mut self, token: &str) {
        let classes = self.classes();
        if !classes.contains(&token) {
            return;
        }
        let remaining = classes
            .into_iter()
            .filter(|c| *c != token)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("class", &remaining);
    }

    /// Serialize the tag.
    ///
    /// Mutated attributes whose value is empty are written as a bare name.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 2 + self.attributes.len() * 16);
        out.push('<');
        out.push_str(&self.name);
        for attribute in &self.attributes {
            attribute.render_into(&mut out);
        }
        out.push_str(&self.tail);
        out.push_str(if self.self_closing { "/>" } else { ">" });
        out
    }
}

/// Parse one declaration from the start of `s`.
///
/// Returns the attribute and the unparsed remainder.
fn parse_attribute<'a>(lead: &str, s: &'a str) -> Option<(Attribute, &'a str)> {
    let name_end = s
        .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
        .unwrap_or(s.len());
    let name = &s[..name_end];
    if name.is_empty() {
        // Stray `=` with no name: treat it as malformed.
        return None;
    }

    let after_name = &s[name_end..];
    let after_ws = after_name.trim_start();
    let Some(after_eq) = after_ws.strip_prefix('=') else {
        let attribute = Attribute {
            name: name.to_owned(),
            value: None,
            lead: lead.to_owned(),
            raw: Some(name.to_owned()),
            quote: None,
        };
        return Some((attribute, after_name));
    };

    let value_start = after_eq.trim_start();
    let (value, quote, remaining) = match value_start.chars().next() {
        Some(q @ ('"' | '\'')) => {
            let body = &value_start[1..];
            let close = body.find(q)?;
            (&body[..close], Some(q), &body[close + 1..])
        }
        Some(_) => {
            let end = value_start
                .find(char::is_whitespace)
                .unwrap_or(value_start.len());
            (&value_start[..end], None, &value_start[end..])
        }
        None => ("", None, value_start),
    };

    let consumed = s.len() - remaining.len();
    let attribute = Attribute {
        name: name.to_owned(),
        value: Some(value.to_owned()),
        lead: lead.to_owned(),
        raw: Some(s[..consumed].to_owned()),
        quote,
    };
    Some((attribute, remaining))
}
