use ldap_filter::{
    Attribute, AttributeValue, Entry, Filter, MatchOptions, OrderingPolicy, parse,
};
use std::collections::HashMap;

fn sn(value: impl Into<AttributeValue>) -> Entry {
    Entry::new().with("sn", value)
}

#[test]
fn test_equality() {
    let filter = Attribute::new("sn").equal_to("smith");
    assert!(filter.matches(&sn("smith")));
    assert!(filter.matches(&sn("SMITH")));
    assert!(!filter.matches(&sn("bob")));
}

#[test]
fn test_multi_value_equality() {
    let filter = Attribute::new("sn").equal_to("smith");
    assert!(filter.matches(&sn(vec!["Sam", "Smith", "Swanson", "Samson"])));
    assert!(!filter.matches(&sn(vec!["Sam", "Swanson", "Samson"])));
}

#[test]
fn test_present() {
    for filter in [Attribute::new("sn").present(), parse("(sn=*)").unwrap()] {
        assert!(filter.matches(&sn("smith")));
        assert!(filter.matches(&sn("alex")));
        assert!(!filter.matches(&Entry::new().with("mail", "smith")));
    }
}

#[test]
fn test_present_needs_a_non_empty_member() {
    let filter = parse("(sn=*)").unwrap();
    assert!(!filter.matches(&sn("")));
    assert!(!filter.matches(&sn(vec!["", ""])));
    assert!(filter.matches(&sn(vec!["", "smith"])));
    assert!(filter.matches(&sn(0)));
}

#[test]
fn test_contains() {
    let filter = Attribute::new("sn").contains("smith");
    assert!(filter.matches(&sn("smith")));
    assert!(filter.matches(&sn("smith-jonson")));
    assert!(filter.matches(&sn("jonson-smith")));
    assert!(filter.matches(&sn("Von Ubersmith")));
    assert!(!filter.matches(&sn("Jonson")));
}

#[test]
fn test_starts_with() {
    let filter = Attribute::new("sn").starts_with("smith");
    assert!(filter.matches(&sn("smith")));
    assert!(filter.matches(&sn("smith-jonson")));
    assert!(!filter.matches(&sn("Von Ubersmith")));
}

#[test]
fn test_ends_with() {
    let filter = Attribute::new("sn").ends_with("smith");
    assert!(filter.matches(&sn("smith")));
    assert!(filter.matches(&sn("Von Ubersmith")));
    assert!(!filter.matches(&sn("smith-jonson")));
}

#[test]
fn test_greater_than_numeric() {
    let filter = Attribute::new("age").gte("10");
    let age = |v: AttributeValue| Entry::new().with("age", v);

    assert!(filter.matches(&age(10.into())));
    assert!(filter.matches(&age("10".into())));
    assert!(filter.matches(&age(11.into())));
    assert!(filter.matches(&age("11".into())));
    assert!(!filter.matches(&age(9.into())));
    assert!(!filter.matches(&age("9".into())));
}

#[test]
fn test_greater_than_lexical() {
    let filter = Attribute::new("name").gte("bob");
    let name = |v: &str| Entry::new().with("name", v);

    assert!(filter.matches(&name("bob")));
    assert!(filter.matches(&name("cell")));
    assert!(!filter.matches(&name("acme")));
}

#[test]
fn test_less_than_numeric() {
    let filter = Attribute::new("age").lte("10");
    let age = |v: AttributeValue| Entry::new().with("age", v);

    assert!(filter.matches(&age(9.into())));
    assert!(filter.matches(&age("9".into())));
    assert!(filter.matches(&age(10.into())));
    assert!(filter.matches(&age("10".into())));
    assert!(!filter.matches(&age(11.into())));
    assert!(!filter.matches(&age("11".into())));
}

#[test]
fn test_less_than_lexical() {
    let filter = Attribute::new("name").lte("bob");
    let name = |v: &str| Entry::new().with("name", v);

    assert!(filter.matches(&name("acme")));
    assert!(filter.matches(&name("bob")));
    assert!(!filter.matches(&name("cell")));
}

#[test]
fn test_lexical_ordering_policy() {
    let filter = Attribute::new("age").gte("10");
    let options = MatchOptions::new().ordering(OrderingPolicy::Lexical);
    assert!(filter.matches_with(&Entry::new().with("age", "9"), &options));
    assert!(!filter.matches_with(&Entry::new().with("age", "09"), &options));
}

#[test]
fn test_ordering_any_member() {
    let filter = Attribute::new("age").gte(30);
    assert!(filter.matches(&Entry::new().with("age", vec![12, 45])));
    assert!(!filter.matches(&Entry::new().with("age", vec![12, 29])));
}

#[test]
fn test_approx_never_matches() {
    let filter = Attribute::new("name").approx("ashcroft");
    assert!(!filter.matches(&Entry::new().with("name", "Ashcroft")));
    assert!(!filter.matches(&Entry::new().with("name", "ashcroft")));
}

#[test]
fn test_and_aggregate() {
    let filter = Filter::and(vec![
        Attribute::new("firstName").equal_to("Alice"),
        Attribute::new("lastName").ends_with("Chains"),
    ])
    .unwrap();

    let person = |first: &str, last: Option<&str>| {
        let entry = Entry::new().with("firstName", first);
        match last {
            Some(last) => entry.with("lastName", last),
            None => entry,
        }
    };

    assert!(filter.matches(&person("Alice", Some("Chains"))));
    assert!(filter.matches(&person("Alice", Some("In-Chains"))));
    assert!(!filter.matches(&person("Bob", Some("Chains"))));
    assert!(!filter.matches(&person("Alice", None)));
}

#[test]
fn test_or_aggregate() {
    let filter = Filter::or(vec![
        Attribute::new("firstName").equal_to("Alice"),
        Attribute::new("lastName").ends_with("Chains"),
    ])
    .unwrap();

    let record = |pairs: &[(&str, &str)]| pairs.iter().copied().collect::<Entry>();

    assert!(filter.matches(&record(&[("firstName", "Alice"), ("lastName", "Chains")])));
    assert!(filter.matches(&record(&[("firstName", "Alice"), ("lastName", "In-Chains")])));
    assert!(filter.matches(&record(&[("firstName", "Bob"), ("lastName", "Chains")])));
    assert!(filter.matches(&record(&[("firstName", "Alice")])));
    assert!(!filter.matches(&record(&[("firstName", "Bob"), ("lastName", "Smith")])));
    assert!(!filter.matches(&record(&[("firstName", "Bob")])));
    assert!(!filter.matches(&Entry::new()));
}

#[test]
fn test_not_aggregate() {
    let filter = Filter::not(vec![Attribute::new("firstName").equal_to("Alice")]).unwrap();

    assert!(filter.matches(&Entry::new().with("firstName", "Bob")));
    assert!(filter.matches(&Entry::new()));
    assert!(!filter.matches(&Entry::new().with("firstName", "Alice")));
    assert!(!filter.matches(
        &Entry::new()
            .with("firstName", "Alice")
            .with("lastName", "Chains")
    ));
}

#[test]
fn test_escaped() {
    let filter = Attribute::new("escaped").equal_to("*(test)*");
    assert!(filter.matches(&Entry::new().with("escaped", "*(test)*")));
    assert!(!filter.matches(&Entry::new().with("escaped", "(test)")));
    assert!(!filter.matches(&Entry::new()));
}

#[test]
fn test_match_substrings() {
    let filter = Attribute::new("sub").raw("*jer* jo*e*");
    assert!(filter.matches(&Entry::new().with("sub", "Jerry Jones")));
}

#[test]
fn test_match_escaped() {
    let filter = Attribute::new("sub").raw("jerry\\2a \\28jones\\29 \\5c");
    assert!(filter.matches(&Entry::new().with("sub", "Jerry* (Jones) \\")));
}

#[test]
fn test_match_escaped_substrings() {
    let filter = Attribute::new("sub").raw("*jerry\\5c \\2a j*s*");
    assert!(filter.matches(&Entry::new().with("sub", "Jerry\\ * Jones")));
}

#[test]
fn test_regex_metacharacters_are_literal() {
    let filter = Attribute::new("mail").ends_with(".example.com");
    assert!(filter.matches(&Entry::new().with("mail", "ron@mail.example.com")));
    assert!(!filter.matches(&Entry::new().with("mail", "ron@mailxexamplexcom")));
}

#[test]
fn test_hash_map_record() {
    let mut record: HashMap<String, AttributeValue> = HashMap::new();
    record.insert("sn".to_string(), "Smith".into());

    let filter = parse("(|(sn=smith)(sn=jones))").unwrap();
    assert!(filter.matches(&record));
}

#[test]
fn test_record_from_json() {
    let record: Entry = serde_json::from_value(serde_json::json!({
        "cn": ["admins", "staff"],
        "uidNumber": 1001
    }))
    .unwrap();

    assert!(parse("(&(cn=staff)(uidNumber>=1000))").unwrap().matches(&record));
    assert!(!parse("(uidNumber<=1000)").unwrap().matches(&record));
}
