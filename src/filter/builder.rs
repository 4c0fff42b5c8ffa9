use super::parser::is_valid_attribute;
use super::{Comparison, ConstructionError, Filter, Operator};
use crate::escape::escape;
use std::fmt::Display;

/// Builder for comparisons on a single attribute
///
/// Values are rendered with `Display` and then escaped, so numbers become
/// their decimal text (`1000`, `10.26`, `-10`). Only [`Attribute::raw`] skips
/// escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
}

impl Attribute {
    /// Builder for a trusted attribute name
    ///
    /// The name is not checked; a name the parser would reject (empty, or
    /// containing `(`, `)` or whitespace) renders as a filter that does not
    /// parse back. Use [`Attribute::try_new`] for names from user input.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Builder for a name made of `[A-Za-z0-9-.;_]`, the same set [`super::parse`] accepts
    pub fn try_new(name: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if is_valid_attribute(&name) {
            Ok(Self { name })
        } else {
            Err(ConstructionError::InvalidAttribute(name))
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(name=*)`
    pub fn present(&self) -> Filter {
        self.comparison(Operator::Equality, "*".to_string())
    }

    /// `(name=value)` with `value` used verbatim, wildcards and escapes included
    pub fn raw(&self, value: impl Display) -> Filter {
        self.comparison(Operator::Equality, value.to_string())
    }

    /// `(name=value)`
    pub fn equal_to(&self, value: impl Display) -> Filter {
        self.comparison(Operator::Equality, escaped(value))
    }

    /// `(name=value*)`
    pub fn starts_with(&self, value: impl Display) -> Filter {
        self.comparison(Operator::Equality, format!("{}*", escaped(value)))
    }

    /// `(name=*value)`
    pub fn ends_with(&self, value: impl Display) -> Filter {
        self.comparison(Operator::Equality, format!("*{}", escaped(value)))
    }

    /// `(name=*value*)`
    pub fn contains(&self, value: impl Display) -> Filter {
        self.comparison(Operator::Equality, format!("*{}*", escaped(value)))
    }

    /// `(name~=value)`
    pub fn approx(&self, value: impl Display) -> Filter {
        self.comparison(Operator::Approximate, escaped(value))
    }

    /// `(name<=value)`
    pub fn lte(&self, value: impl Display) -> Filter {
        self.comparison(Operator::LessOrEqual, escaped(value))
    }

    /// `(name>=value)`
    pub fn gte(&self, value: impl Display) -> Filter {
        self.comparison(Operator::GreaterOrEqual, escaped(value))
    }

    fn comparison(&self, operator: Operator, value: String) -> Filter {
        Filter::Comparison(Comparison::new(self.name.clone(), operator, value))
    }
}

fn escaped(value: impl Display) -> String {
    escape(&value.to_string())
}
