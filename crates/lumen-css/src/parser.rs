//! Stylesheet parser.
//!
//! # Grammar
//!
//! ```text
//! stylesheet  := (whitespace rule)*
//! rule        := selector '{' whitespace body whitespace '}'
//! selector    := word (whitespace word)*
//! body        := (pair whitespace ';' whitespace)*
//! pair        := word whitespace ':' whitespace word
//! word        := [letters digits # - . %]+
//! ```
//!
//! Whitespace includes `/* ... */` comments.
//!
//! # Recovery
//!
//! Parsing never fails as a whole. A malformed declaration is skipped up to
//! the next `;` (parsing resumes after it) or the closing `}` (the block
//! ends). A malformed rule is skipped up to the next `}`; if there is none the
//! rest of the input is ignored. Each recovered [`ParseError`] is reported
//! through `log::debug!`.

use thiserror::Error;

use crate::selector::Selector;
use crate::style::StyleMap;

/// How much input to show on either side of an error position.
const CONTEXT_RADIUS: usize = 10;

/// A grammar failure at a position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A word token was required but the input had none.
    #[error("expected word at offset {offset} near '{context}'")]
    ExpectedWord {
        /// Character offset of the failure.
        offset: usize,
        /// Input surrounding the failure.
        context: String,
    },
    /// A specific character was required.
    #[error("expected '{literal}' at offset {offset} near '{context}'")]
    ExpectedLiteral {
        /// The character the grammar wanted.
        literal: char,
        /// Character offset of the failure.
        offset: usize,
        /// Input surrounding the failure.
        context: String,
    },
}

/// One `selector { declarations }` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Which nodes the rule applies to.
    pub selector: Selector,
    /// The declarations, later ones in the block winning on duplicates.
    pub declarations: StyleMap,
}

/// Parse a whole stylesheet into rules, in source order.
#[must_use]
pub fn parse_stylesheet(text: &str) -> Vec<Rule> {
    CssParser::new(text).parse()
}

/// Parse a declaration block without braces, such as a `style` attribute.
#[must_use]
pub fn parse_declarations(text: &str) -> StyleMap {
    let mut parser = CssParser::new(text);
    parser.whitespace();
    parser.body()
}

/// Recursive-descent parser with single-character lookahead.
#[derive(Debug)]
pub struct CssParser {
    input: Vec<char>,
    pos: usize,
}

impl CssParser {
    /// Create a parser over `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            pos: 0,
        }
    }

    /// True once all input is consumed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        let mut chars = self.input[self.pos..].iter();
        prefix.chars().all(|c| chars.next() == Some(&c))
    }

    /// Skip whitespace and comments. An unterminated comment runs to the end.
    pub fn whitespace(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            if !self.starts_with("/*") {
                break;
            }
            self.pos += 2;
            while !self.is_eof() && !self.starts_with("*/") {
                self.pos += 1;
            }
            self.pos = (self.pos + 2).min(self.input.len());
        }
    }

    /// Consume `literal` or fail without consuming anything.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedLiteral`] if the next character differs.
    pub fn literal(&mut self, literal: char) -> Result<(), ParseError> {
        if self.peek() == Some(literal) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ParseError::ExpectedLiteral {
                literal,
                offset: self.pos,
                context: self.context(),
            })
        }
    }

    /// Consume a run of letters, digits, `#`, `-`, `.` and `%`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedWord`] if the run is empty.
    pub fn word(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '#' | '-' | '.' | '%'))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ParseError::ExpectedWord {
                offset: self.pos,
                context: self.context(),
            });
        }
        Ok(self.input[start..self.pos].iter().collect())
    }

    /// Advance to the next character in `stops` without consuming it.
    /// Returns the character found, or `None` with the input exhausted.
    pub fn ignore_until(&mut self, stops: &[char]) -> Option<char> {
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                return Some(c);
            }
            self.pos += 1;
        }
        None
    }

    /// Parse `property: value`. The property name is lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if either word or the colon is missing.
    pub fn pair(&mut self) -> Result<(String, String), ParseError> {
        let property = self.word()?.to_ascii_lowercase();
        self.whitespace();
        self.literal(':')?;
        self.whitespace();
        let value = self.word()?;
        Ok((property, value))
    }

    /// Parse declarations until the closing `}` (left unconsumed) or the end
    /// of input.
    pub fn body(&mut self) -> StyleMap {
        let mut declarations = StyleMap::new();
        while !self.is_eof() {
            let step = match self.pair() {
                Ok((property, value)) => {
                    // Kept even if the `;` turns out to be missing.
                    let _ = declarations.insert(property, value);
                    self.whitespace();
                    self.literal(';')
                }
                Err(err) => Err(err),
            };
            match step {
                Ok(()) => {
                    self.whitespace();
                    if self.peek() == Some('}') {
                        break;
                    }
                }
                Err(err) => {
                    log::debug!(target: "lumen::css", "skipping declaration: {err}");
                    if self.ignore_until(&[';', '}']) == Some(';') {
                        self.pos += 1;
                        self.whitespace();
                    } else {
                        break;
                    }
                }
            }
        }
        declarations
    }

    /// Parse a selector: the first word, then one descendant step per
    /// further word, up to `{`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExpectedWord`] on any non-word token.
    pub fn selector(&mut self) -> Result<Selector, ParseError> {
        let mut out = Selector::from_token(&self.word()?.to_ascii_lowercase());
        self.whitespace();
        while self.peek().is_some_and(|c| c != '{') {
            let next = Selector::from_token(&self.word()?.to_ascii_lowercase());
            out = Selector::Descendant(Box::new(out), Box::new(next));
            self.whitespace();
        }
        Ok(out)
    }

    fn rule(&mut self) -> Result<Rule, ParseError> {
        self.whitespace();
        let selector = self.selector()?;
        self.literal('{')?;
        self.whitespace();
        let declarations = self.body();
        self.whitespace();
        self.literal('}')?;
        self.whitespace();
        Ok(Rule {
            selector,
            declarations,
        })
    }

    /// Parse rules until the input is exhausted.
    pub fn parse(&mut self) -> Vec<Rule> {
        let mut rules = Vec::new();
        self.whitespace();
        while !self.is_eof() {
            match self.rule() {
                Ok(rule) => rules.push(rule),
                Err(err) => {
                    log::debug!(target: "lumen::css", "skipping rule: {err}");
                    if self.ignore_until(&['}']) == Some('}') {
                        self.pos += 1;
                        self.whitespace();
                    } else {
                        break;
                    }
                }
            }
        }
        rules
    }

    fn context(&self) -> String {
        let from = self.pos.saturating_sub(CONTEXT_RADIUS);
        let to = (self.pos + CONTEXT_RADIUS).min(self.input.len());
        self.input[from..to].iter().collect()
    }
}
