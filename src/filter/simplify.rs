use super::{Filter, Group, GroupKind};

impl Filter {
    /// Collapse `&` and `|` groups that hold a single filter
    ///
    /// `(&(|(a=1)))` becomes `(a=1)`. `!` groups are kept, only their child is
    /// simplified. Child order is preserved and the result is a new tree;
    /// simplifying it again changes nothing.
    pub fn simplify(self) -> Filter {
        match self {
            Filter::Comparison(_) => self,
            Filter::Group(Group { kind, children }) => {
                let mut children: Vec<Filter> =
                    children.into_iter().map(Filter::simplify).collect();

                if kind != GroupKind::Not && children.len() == 1 {
                    // Already simplified above.
                    return children.remove(0);
                }

                Filter::Group(Group { kind, children })
            }
        }
    }

    /// [`Filter::simplify`] without consuming the tree
    pub fn simplified(&self) -> Filter {
        self.clone().simplify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simplify(input: &str) -> String {
        Filter::parse(input).unwrap().simplify().to_string()
    }

    #[test]
    fn test_collapses_single_child_groups() {
        assert_eq!(
            simplify("(&(|(sn=ron)(&(sn=bob)))(|(mail=*))(!(account=disabled)))"),
            "(&(|(sn=ron)(sn=bob))(mail=*)(!(account=disabled)))"
        );
    }

    #[test]
    fn test_collapses_nested_chain_to_leaf() {
        assert_eq!(simplify("(&(|(&(a=1))))"), "(a=1)");
    }

    #[test]
    fn test_keeps_not() {
        assert_eq!(simplify("(!(|(cn=admins)))"), "(!(cn=admins))");
        assert_eq!(simplify("(&(!(a=1)))"), "(!(a=1))");
    }

    #[test]
    fn test_idempotent() {
        let once = Filter::parse("(&(|(a=1)(&(b=2)))(|(c=3)))")
            .unwrap()
            .simplify();
        assert_eq!(once.clone().simplify(), once);
    }

    #[test]
    fn test_simplified_leaves_original_untouched() {
        let original = Filter::parse("(&(a=1))").unwrap();
        let simple = original.simplified();
        assert_eq!(original.to_string(), "(&(a=1))");
        assert_eq!(simple.to_string(), "(a=1)");
    }
}
