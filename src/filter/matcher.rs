use super::{Comparison, Filter, GroupKind, Operator};
use crate::pattern::{
    MatchOptions, Record, match_approx, match_gte, match_lte, match_string,
};

impl Filter {
    /// Evaluate against `record` with default [`MatchOptions`]
    pub fn matches(&self, record: &impl Record) -> bool {
        self.matches_with(record, &MatchOptions::default())
    }

    /// Evaluate against `record`
    ///
    /// A comparison on an attribute the record does not carry never matches,
    /// so `(!(attr=...))` matches such a record.
    pub fn matches_with(&self, record: &impl Record, options: &MatchOptions) -> bool {
        match self {
            Filter::Comparison(c) => c.matches_with(record, options),
            Filter::Group(g) => {
                let mut children = g.children.iter();
                match g.kind {
                    GroupKind::And => children.all(|f| f.matches_with(record, options)),
                    GroupKind::Or => children.any(|f| f.matches_with(record, options)),
                    GroupKind::Not => !children.any(|f| f.matches_with(record, options)),
                }
            }
        }
    }
}

impl Comparison {
    pub fn matches_with(&self, record: &impl Record, options: &MatchOptions) -> bool {
        let Some(value) = record.attribute(&self.attribute) else {
            return false;
        };

        match self.operator {
            Operator::Equality if self.is_presence() => value.is_present(),
            Operator::Equality => match_string(value, &self.value),
            Operator::LessOrEqual => match_lte(value, &self.value, options.ordering),
            Operator::GreaterOrEqual => match_gte(value, &self.value, options.ordering),
            Operator::Approximate => match_approx(value, &self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Entry, OrderingPolicy};

    #[test]
    fn test_presence_ignores_substring_rules() {
        let filter = Filter::parse("(sn=*)").unwrap();
        assert!(filter.matches(&Entry::new().with("sn", "x")));
        assert!(!filter.matches(&Entry::new().with("sn", "")));
        assert!(!filter.matches(&Entry::new().with("mail", "x")));
    }

    #[test]
    fn test_not_over_missing_attribute_matches() {
        let filter = Filter::parse("(!(sn=smith))").unwrap();
        assert!(filter.matches(&Entry::new()));
    }

    #[test]
    fn test_and_requires_every_child() {
        let filter = Filter::parse("(&(a=1)(b=2))").unwrap();
        assert!(filter.matches(&Entry::new().with("a", 1).with("b", 2)));
        assert!(!filter.matches(&Entry::new().with("a", 1).with("b", 3)));
    }

    #[test]
    fn test_ordering_policy_is_applied() {
        let filter = Filter::parse("(age>=10)").unwrap();
        let record = Entry::new().with("age", "9");
        assert!(!filter.matches(&record));
        assert!(filter.matches_with(
            &record,
            &MatchOptions::new().ordering(OrderingPolicy::Lexical)
        ));
    }
}
