use super::GroupKind;
use std::fmt;
use thiserror::Error;

/// Errors raised by the group and attribute constructors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("NOT requires exactly one filter, got {0}")]
    NotArity(usize),

    #[error("{0} group requires at least one filter")]
    EmptyGroup(GroupKind),

    #[error("Invalid attribute name '{0}'")]
    InvalidAttribute(String),
}

/// What went wrong while parsing a filter string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended in the middle of a filter
    UnexpectedEnd,
    /// A `(` was required
    ExpectedOpenParen,
    /// A `)` was required
    ExpectedCloseParen,
    /// No `=`, `<=`, `>=` or `~=` after the attribute name
    MissingOperator,
    /// Attribute name is empty or contains characters outside `[A-Za-z0-9-.;_]`
    InvalidAttribute,
    /// Raw NUL in a value; it must be written `\00`
    UnescapedNul,
    /// `&` or `|` without any sub-filter
    EmptyGroup,
    /// Characters remain after a complete filter
    TrailingInput,
    /// Groups nested deeper than [`super::parser::MAX_DEPTH`]
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ParseErrorKind::UnexpectedEnd => "Unexpected end of filter",
            ParseErrorKind::ExpectedOpenParen => "Expected '('",
            ParseErrorKind::ExpectedCloseParen => "Expected ')'",
            ParseErrorKind::MissingOperator => "Missing comparison operator",
            ParseErrorKind::InvalidAttribute => "Invalid attribute name",
            ParseErrorKind::UnescapedNul => "Unescaped NUL in value",
            ParseErrorKind::EmptyGroup => "Empty filter group",
            ParseErrorKind::TrailingInput => "Unexpected trailing input",
            ParseErrorKind::NestingTooDeep => "Filter nested too deeply",
        };
        f.write_str(reason)
    }
}

/// Malformed filter text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position} near '{fragment}'")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the original input
    pub position: usize,
    /// Input starting at `position`, truncated for display
    pub fragment: String,
}

/// Any error produced while building a filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("Invalid filter expression: {0}")]
    Parse(#[from] ParseError),
}
