//! Recursive-descent parser for RFC 4515 filter strings
//!
//! The accepted language is slightly more permissive than the RFC:
//!
//! ```text
//! input      = ws ( filter / item ) ws
//! filter     = "(" ws filtercomp ws ")"
//! filtercomp = "&" filterlist / "|" filterlist / "!" ws filter / item
//! filterlist = 1*(ws filter) ws
//! item       = attr ws op value
//! op         = "=" / "<=" / ">=" / "~="
//! attr       = 1*(ALPHA / DIGIT / "-" / "." / ";" / "_")
//! value      = *(any character except "(", ")" and NUL)
//! ```
//!
//! Values are stored verbatim, escapes included, so that serializing a
//! parsed filter gives back the original text.

use super::error::{ParseError, ParseErrorKind};
use super::{Comparison, Filter, Group, GroupKind, Operator};

/// Nesting limit for parenthesized groups
pub const MAX_DEPTH: usize = 256;

const FRAGMENT_LEN: usize = 24;

/// Parse a complete filter string
///
/// Leading and trailing whitespace is ignored and the outermost parentheses
/// are optional for a single comparison (`sn=ron`).
pub fn parse(input: &str) -> Result<Filter, ParseError> {
    let end = input.trim_end().len();
    let mut parser = Parser::new(&input[..end], input);
    parser.skip_whitespace();

    let filter = match parser.peek() {
        None => return Err(parser.error(ParseErrorKind::UnexpectedEnd)),
        Some('(') => parser.parse_filter(0)?,
        Some(_) => parser.parse_item()?,
    };

    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error(ParseErrorKind::TrailingInput));
    }

    Ok(filter)
}

struct Parser<'a> {
    /// Input with trailing whitespace removed
    text: &'a str,
    /// Untrimmed input, for error fragments
    original: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, original: &'a str) -> Self {
        Self {
            text,
            original,
            pos: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char, kind: ParseErrorKind) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(_) => Err(self.error(kind)),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            position: self.pos,
            fragment: self.original[self.pos..].chars().take(FRAGMENT_LEN).collect(),
        }
    }

    /// `"(" filtercomp ")"`
    fn parse_filter(&mut self, depth: usize) -> Result<Filter, ParseError> {
        if depth >= MAX_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep));
        }

        self.expect('(', ParseErrorKind::ExpectedOpenParen)?;
        self.skip_whitespace();

        let filter = match self.peek() {
            Some('&') => {
                self.bump();
                self.parse_list(GroupKind::And, depth)?
            }
            Some('|') => {
                self.bump();
                self.parse_list(GroupKind::Or, depth)?
            }
            Some('!') => {
                self.bump();
                self.skip_whitespace();
                let child = self.parse_filter(depth + 1)?;
                Filter::Group(Group {
                    kind: GroupKind::Not,
                    children: vec![child],
                })
            }
            Some(_) => self.parse_item()?,
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
        };

        self.skip_whitespace();
        self.expect(')', ParseErrorKind::ExpectedCloseParen)?;
        Ok(filter)
    }

    /// One or more parenthesized filters
    fn parse_list(&mut self, kind: GroupKind, depth: usize) -> Result<Filter, ParseError> {
        let mut children = Vec::new();

        self.skip_whitespace();
        while self.peek() == Some('(') {
            children.push(self.parse_filter(depth + 1)?);
            self.skip_whitespace();
        }

        if children.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyGroup));
        }

        Ok(Filter::Group(Group { kind, children }))
    }

    /// `attr op value`
    fn parse_item(&mut self) -> Result<Filter, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(is_attribute_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(match self.peek() {
                None => self.error(ParseErrorKind::UnexpectedEnd),
                Some(_) => self.error(ParseErrorKind::InvalidAttribute),
            });
        }
        let attribute = &self.text[start..self.pos];

        self.skip_whitespace();
        let operator = self.parse_operator()?;

        let value_start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                '(' | ')' => break,
                '\0' => return Err(self.error(ParseErrorKind::UnescapedNul)),
                _ => {
                    self.bump();
                }
            }
        }
        let value = &self.text[value_start..self.pos];

        Ok(Filter::Comparison(Comparison::new(attribute, operator, value)))
    }

    fn parse_operator(&mut self) -> Result<Operator, ParseError> {
        let rest = self.rest();
        let (operator, len) = if rest.starts_with('=') {
            (Operator::Equality, 1)
        } else if rest.starts_with("<=") {
            (Operator::LessOrEqual, 2)
        } else if rest.starts_with(">=") {
            (Operator::GreaterOrEqual, 2)
        } else if rest.starts_with("~=") {
            (Operator::Approximate, 2)
        } else {
            return Err(self.error(ParseErrorKind::MissingOperator));
        };

        self.pos += len;
        Ok(operator)
    }
}

fn is_attribute_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ';' | '_')
}

/// Whether `name` is accepted as an attribute by [`parse`]
pub(crate) fn is_valid_attribute(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_attribute_char)
}
