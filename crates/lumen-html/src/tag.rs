//! The attribute grammar inside a tag.
//!
//! ```text
//! tag       := name (whitespace attribute)*
//! attribute := name ('=' (quoted | bare))?
//! quoted    := '"' [^"]* '"' | '\'' [^']* '\''
//! bare      := [^whitespace]+
//! ```
//!
//! A name is a run of letters, digits, `:`, `/` and `-`. A leading `/` marks a
//! closing tag. An attribute without `=` is boolean and gets the value
//! `"true"`. A malformed attribute is skipped up to the next whitespace; it
//! never aborts the rest of the tag.

use lumen_dom::AttributesMap;
use thiserror::Error;

/// Value given to attributes written without `=`.
pub const BOOLEAN_ATTRIBUTE_VALUE: &str = "true";

/// How much input to show on either side of an error position.
const CONTEXT_RADIUS: usize = 10;

/// A grammar failure inside a tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// A name or value token was required but the input had none.
    #[error("expected {expected} at offset {offset} near '{context}'")]
    Expected {
        /// What the grammar wanted.
        expected: &'static str,
        /// Character offset of the failure.
        offset: usize,
        /// Input surrounding the failure.
        context: String,
    },
}

/// A parsed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased tag name without the closing `/`.
    pub name: String,
    /// True for `</name>`.
    pub closing: bool,
    /// Attributes with lowercased names.
    pub attrs: AttributesMap,
}

/// Recursive-descent parser over the raw contents of one tag.
#[derive(Debug)]
pub struct TagParser {
    input: Vec<char>,
    pos: usize,
}

impl TagParser {
    /// Create a parser over `raw` (the text between `<` and `>`).
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            input: raw.chars().collect(),
            pos: 0,
        }
    }

    /// Parse a whole tag.
    ///
    /// # Errors
    ///
    /// Fails only when the tag has no name. Attribute errors are recovered.
    pub fn tag(mut self) -> Result<Tag, TagError> {
        let raw_name = self.name()?;
        self.whitespace();
        let attrs = self.body();

        let (closing, name) = match raw_name.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, raw_name.trim_end_matches('/')),
        };
        Ok(Tag {
            name: name.to_ascii_lowercase(),
            closing,
            attrs,
        })
    }

    /// Parse attributes until the input is exhausted.
    pub fn body(&mut self) -> AttributesMap {
        let mut attrs = AttributesMap::new();
        while self.pos < self.input.len() {
            match self.attribute() {
                Ok((name, value)) => {
                    // A stray `/` (as in `<img src=a.png />`) is not an attribute.
                    if name != "/" {
                        let _ = attrs.insert(name.to_ascii_lowercase(), value);
                    }
                    self.whitespace();
                }
                Err(err) => {
                    log::debug!(target: "lumen::html", "skipping malformed attribute: {err}");
                    if self.skip_to_whitespace() {
                        self.whitespace();
                    } else {
                        break;
                    }
                }
            }
        }
        attrs
    }

    /// Parse one `name` or `name=value` attribute.
    ///
    /// # Errors
    ///
    /// Returns [`TagError`] if the name or a bare value is empty.
    pub fn attribute(&mut self) -> Result<(String, String), TagError> {
        let name = self.name()?;
        if !self.check_literal('=') {
            return Ok((name, BOOLEAN_ATTRIBUTE_VALUE.to_string()));
        }
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.quoted_value(quote)
            }
            _ => self.bare_value()?,
        };
        Ok((name, value))
    }

    /// Consume a name token.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Expected`] if no name character is present.
    pub fn name(&mut self) -> Result<String, TagError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, ':' | '/' | '-'))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.expected("name"));
        }
        Ok(self.input[start..self.pos].iter().collect())
    }

    /// Consume an unquoted value, up to the next whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Expected`] if the value is empty.
    pub fn bare_value(&mut self) -> Result<String, TagError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| !c.is_whitespace()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.expected("value"));
        }
        Ok(self.input[start..self.pos].iter().collect())
    }

    /// Consume a quoted value whose opening `quote` was already consumed.
    /// An unterminated value runs to the end of the tag.
    pub fn quoted_value(&mut self, quote: char) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != quote) {
            self.pos += 1;
        }
        let value = self.input[start..self.pos].iter().collect();
        // Step over the closing quote if there is one.
        self.pos = (self.pos + 1).min(self.input.len());
        value
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn check_literal(&mut self, literal: char) -> bool {
        if self.peek() == Some(literal) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Advance to the next whitespace character. Returns false (with the
    /// input exhausted) if there is none.
    fn skip_to_whitespace(&mut self) -> bool {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                return true;
            }
            self.pos += 1;
        }
        false
    }

    fn expected(&self, expected: &'static str) -> TagError {
        let from = self.pos.saturating_sub(CONTEXT_RADIUS);
        let to = (self.pos + CONTEXT_RADIUS).min(self.input.len());
        TagError::Expected {
            expected,
            offset: self.pos,
            context: self.input[from..to].iter().collect(),
        }
    }
}
