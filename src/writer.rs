//! Streaming JSON writer
//!
//! The minimal capability set the emission engine needs: open/close
//! objects and arrays, write named members with typed values, and splice
//! raw pre-serialized text. The writer owns separator placement — it
//! tracks a first-item flag per open scope — so plan replay never has to
//! know whether the previous member of an object was omitted.
//!
//! Output is compact UTF-8: no inter-token whitespace, strings escaped per
//! RFC 8259 (quote, backslash, and the full control-char range).

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Object,
    Array,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    has_items: bool,
}

/// Escape a string for inclusion in JSON output (without the surrounding
/// quotes).
pub fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// A comma-tracking JSON writer over any `io::Write`
#[derive(Debug)]
pub struct JsonWriter<W: Write> {
    out: W,
    scopes: Vec<Scope>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            scopes: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Write the separator for the next item of the current scope, if one
    /// is due, and mark the scope non-empty. At top level this is a no-op.
    fn separate(&mut self) -> io::Result<()> {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.has_items {
                self.out.write_all(b",")?;
            }
            scope.has_items = true;
        }
        Ok(())
    }

    fn quoted(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(b"\"")?;
        self.out.write_all(escape_json(s).as_bytes())?;
        self.out.write_all(b"\"")
    }

    fn name_prefix(&mut self, name: &str) -> io::Result<()> {
        self.separate()?;
        self.quoted(name)?;
        self.out.write_all(b":")
    }

    /// Splice pre-serialized text as the next item: a whole member, an
    /// array element, or the entire top-level value.
    pub fn raw_item(&mut self, text: &str) -> io::Result<()> {
        self.separate()?;
        self.out.write_all(text.as_bytes())
    }

    pub fn begin_object(&mut self, name: Option<&str>) -> io::Result<()> {
        match name {
            Some(name) => self.name_prefix(name)?,
            None => self.separate()?,
        }
        self.out.write_all(b"{")?;
        self.scopes.push(Scope {
            kind: ScopeKind::Object,
            has_items: false,
        });
        Ok(())
    }

    pub fn end_object(&mut self) -> io::Result<()> {
        let scope = self.scopes.pop();
        debug_assert!(matches!(
            scope,
            Some(Scope {
                kind: ScopeKind::Object,
                ..
            })
        ));
        self.out.write_all(b"}")
    }

    pub fn begin_array(&mut self, name: Option<&str>) -> io::Result<()> {
        match name {
            Some(name) => self.name_prefix(name)?,
            None => self.separate()?,
        }
        self.out.write_all(b"[")?;
        self.scopes.push(Scope {
            kind: ScopeKind::Array,
            has_items: false,
        });
        Ok(())
    }

    pub fn end_array(&mut self) -> io::Result<()> {
        let scope = self.scopes.pop();
        debug_assert!(matches!(
            scope,
            Some(Scope {
                kind: ScopeKind::Array,
                ..
            })
        ));
        self.out.write_all(b"]")
    }

    pub fn string_field(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.name_prefix(name)?;
        self.quoted(value)
    }

    pub fn i64_field(&mut self, name: &str, value: i64) -> io::Result<()> {
        self.name_prefix(name)?;
        write!(self.out, "{}", value)
    }

    pub fn bool_field(&mut self, name: &str, value: bool) -> io::Result<()> {
        self.name_prefix(name)?;
        let token: &[u8] = if value { b"true" } else { b"false" };
        self.out.write_all(token)
    }

    /// Write a member whose value is an already-encoded JSON number token.
    /// Used for context-store numbers, which keep their source lexical
    /// form instead of being re-formatted.
    pub fn raw_number_field(&mut self, name: &str, raw: &str) -> io::Result<()> {
        self.name_prefix(name)?;
        self.out.write_all(raw.as_bytes())
    }
}
