use tel_steering::{SteeringSet, SteeringSource, UpdateSet};

fn abc() -> SteeringSet {
    SteeringSet::from_source(
        SteeringSource::Pairs(vec![
            ("A".to_string(), 1.into()),
            ("B".to_string(), 2.into()),
            ("C".to_string(), 3.into()),
        ]),
        None,
    )
    .unwrap()
}

fn names(set: &SteeringSet) -> Vec<&str> {
    set.iter().map(|(name, _)| name).collect()
}

#[test]
fn update_keeps_position_and_addition_appends() {
    let merged = abc().merged(&UpdateSet::new().set("B", 20).set("D", 4));
    assert_eq!(names(&merged), vec!["A", "B", "C", "D"]);
    assert_eq!(merged.get_int("B"), Some(20));
    assert_eq!(merged.get_int("D"), Some(4));
}

#[test]
fn removal_closes_the_gap() {
    let merged = abc().merged(&UpdateSet::new().remove("B"));
    assert_eq!(names(&merged), vec!["A", "C"]);
}

#[test]
fn removing_an_absent_key_is_a_no_op() {
    let base = abc().merged(&UpdateSet::new().set("D", 4).set("E", 5));
    assert_eq!(base.len(), 5);
    let merged = base.merged(&UpdateSet::new().remove("NOT THERE"));
    assert_eq!(merged, base);
}

#[test]
fn the_original_set_is_never_mutated() {
    let base = abc();
    let _ = base.merged(&UpdateSet::new().set("A", 99).remove("C"));
    assert_eq!(base.get_int("A"), Some(1));
    assert!(base.contains_key("C"));
}

#[test]
fn merge_preserves_the_source_file() {
    let base = abc().with_source_file(Some("model.cas".into()));
    let merged = base.merged(&UpdateSet::new().set("D", 4));
    assert_eq!(
        merged.source_file(),
        Some(std::path::Path::new("model.cas"))
    );
}
