// Rust guideline compliant 2026-02-06

//! Object literal writer for response bodies.
//!
//! Response bodies are script object literals rather than strict JSON:
//! keys are bare identifiers and strings use single quotes, e.g.
//! `{version:'0.6',reqId:0,status:'ok'}`. Fields are written in the order
//! they are added.

use std::fmt::Write;

/// Builds a `{key:value,...}` literal with keys in insertion order.
#[derive(Debug, Default)]
pub struct ObjectLiteral {
    buf: String,
    fields: usize,
}

impl ObjectLiteral {
    /// Starts an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&mut self, key: &str) {
        self.buf.push(if self.fields == 0 { '{' } else { ',' });
        self.buf.push_str(key);
        self.buf.push(':');
        self.fields += 1;
    }

    /// Adds a single-quoted string field.
    pub fn string(&mut self, key: &str, value: &str) -> &mut Self {
        self.key(key);
        push_quoted(&mut self.buf, value);
        self
    }

    /// Adds a string field only when a value is present.
    pub fn optional_string(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.string(key, value);
        }
        self
    }

    /// Adds an integer field.
    pub fn integer(&mut self, key: &str, value: i64) -> &mut Self {
        self.key(key);
        let _ = write!(self.buf, "{}", value);
        self
    }

    /// Adds a field whose value is already a script expression.
    pub fn raw(&mut self, key: &str, value: &str) -> &mut Self {
        self.key(key);
        self.buf.push_str(value);
        self
    }

    /// Adds an array of pre-rendered elements.
    pub fn array<I, S>(&mut self, key: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.key(key);
        self.buf.push('[');
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.buf.push_str(item.as_ref());
        }
        self.buf.push(']');
        self
    }

    /// Closes the object and returns its text.
    #[must_use]
    pub fn finish(self) -> String {
        let mut buf = self.buf;
        if self.fields == 0 {
            buf.push('{');
        }
        buf.push('}');
        buf
    }
}

/// Appends `value` as a single-quoted script string.
///
/// Quotes, backslashes, control characters, angle brackets and the line
/// and paragraph separators are escaped so the literal can sit inside a
/// `<script>` element.
fn push_quoted(out: &mut String, value: &str) {
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}
