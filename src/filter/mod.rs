//! LDAP search filters (RFC 4515)
//!
//! A filter is a tree of [`Filter`] nodes: leaves are attribute comparisons,
//! internal nodes are `&`, `|` and `!` groups.
//!
//! # Syntax
//!
//! ```text
//! (attr=value)         Equality; `*` in value is a substring wildcard
//! (attr=*)             Presence
//! (attr<=value)        Less than or equal
//! (attr>=value)        Greater than or equal
//! (attr~=value)        Approximate (never matches)
//! (&(f1)(f2)...)       All sub-filters match
//! (|(f1)(f2)...)       Any sub-filter matches
//! (!(f))               Sub-filter does not match
//! ```
//!
//! Reserved characters in values are written `\5c`, `\2a`, `\28`, `\29` and
//! `\00`; see [`crate::escape`].
//!
//! # Examples
//!
//! ```
//! use ldap_filter::{Attribute, Entry, Filter};
//!
//! let filter = Filter::and(vec![
//!     Attribute::new("sn").equal_to("smith"),
//!     Attribute::new("mail").present(),
//! ])?;
//! assert_eq!(filter.to_string(), "(&(sn=smith)(mail=*))");
//!
//! let parsed: Filter = "(&(sn=smith)(mail=*))".parse()?;
//! assert_eq!(parsed, filter);
//!
//! let record = Entry::new().with("sn", "Smith").with("mail", "s@example.com");
//! assert!(parsed.matches(&record));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod display;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod simplify;

pub use builder::Attribute;
pub use display::FormatOptions;
pub use error::{ConstructionError, FilterError, ParseError, ParseErrorKind};
pub use parser::parse;

use std::fmt;

/// Comparison operator of an attribute assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equality,
    LessOrEqual,
    GreaterOrEqual,
    Approximate,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equality => "=",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Approximate => "~=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean combinator of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    And,
    Or,
    Not,
}

impl GroupKind {
    pub fn symbol(&self) -> char {
        match self {
            GroupKind::And => '&',
            GroupKind::Or => '|',
            GroupKind::Not => '!',
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKind::And => "AND",
            GroupKind::Or => "OR",
            GroupKind::Not => "NOT",
        };
        f.write_str(name)
    }
}

/// Leaf node: `(attribute OP value)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparison {
    attribute: String,
    operator: Operator,
    /// Escaped exactly as serialized; raw `*` are wildcards
    value: String,
}

impl Comparison {
    pub(crate) fn new(
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `(attr=*)`
    pub fn is_presence(&self) -> bool {
        self.operator == Operator::Equality && self.value == "*"
    }
}

/// Internal node: a boolean combinator over one or more filters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    kind: GroupKind,
    children: Vec<Filter>,
}

impl Group {
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn children(&self) -> &[Filter] {
        &self.children
    }
}

/// A parsed or constructed search filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    Comparison(Comparison),
    Group(Group),
}

impl Filter {
    /// Start building a comparison on `name`, rejecting names that would not parse
    pub fn attribute(name: impl Into<String>) -> Result<Attribute, ConstructionError> {
        Attribute::try_new(name)
    }

    /// `(&...)` over one or more filters
    pub fn and(children: impl IntoIterator<Item = Filter>) -> Result<Filter, ConstructionError> {
        Self::group(GroupKind::And, children)
    }

    /// `(|...)` over one or more filters
    pub fn or(children: impl IntoIterator<Item = Filter>) -> Result<Filter, ConstructionError> {
        Self::group(GroupKind::Or, children)
    }

    /// `(!...)`; the input must hold exactly one filter
    pub fn not(children: impl IntoIterator<Item = Filter>) -> Result<Filter, ConstructionError> {
        Self::group(GroupKind::Not, children)
    }

    /// `(!filter)`
    pub fn negate(filter: Filter) -> Filter {
        Filter::Group(Group {
            kind: GroupKind::Not,
            children: vec![filter],
        })
    }

    /// Build a group, enforcing the arity of `kind`
    pub fn group(
        kind: GroupKind,
        children: impl IntoIterator<Item = Filter>,
    ) -> Result<Filter, ConstructionError> {
        let children: Vec<Filter> = children.into_iter().collect();

        match kind {
            GroupKind::Not if children.len() != 1 => {
                Err(ConstructionError::NotArity(children.len()))
            }
            _ if children.is_empty() => Err(ConstructionError::EmptyGroup(kind)),
            _ => Ok(Filter::Group(Group { kind, children })),
        }
    }

    /// Parse RFC 4515 text
    pub fn parse(input: &str) -> Result<Filter, ParseError> {
        parser::parse(input)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, Filter::Comparison(_))
    }

    pub fn as_comparison(&self) -> Option<&Comparison> {
        match self {
            Filter::Comparison(c) => Some(c),
            Filter::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Filter::Group(g) => Some(g),
            Filter::Comparison(_) => None,
        }
    }
}

impl From<Comparison> for Filter {
    fn from(comparison: Comparison) -> Self {
        Filter::Comparison(comparison)
    }
}

impl std::str::FromStr for Filter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}
