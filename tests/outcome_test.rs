use indexmap::IndexMap;
use vitae::{combine_validation_results, FieldPath, Outcome, OutcomeError, Severity, ValidationError};

fn error(code: &str) -> ValidationError {
    ValidationError::new(code, format!("{} happened", code))
}

#[test]
fn test_combine_concatenates_failures_in_order() {
    let mut results = IndexMap::new();
    results.insert("a", Outcome::success(1));
    results.insert("b", Outcome::failure(vec![error("e1")]).unwrap());
    results.insert("c", Outcome::failure(vec![error("e2")]).unwrap());

    let combined = combine_validation_results(results);
    assert!(combined.is_failure());
    let codes: Vec<_> = combined.errors().iter().map(|e| e.code.clone()).collect();
    assert_eq!(codes, vec!["e1", "e2"]);
}

#[test]
fn test_combine_error_count_is_sum_of_failures() {
    let mut results = IndexMap::new();
    results.insert("basics", Outcome::failure(vec![error("a"), error("b")]).unwrap());
    results.insert("work", Outcome::success(()));
    results.insert("skills", Outcome::failure(vec![error("c"), error("d"), error("e")]).unwrap());

    assert_eq!(combine_validation_results(results).errors().len(), 5);
}

#[test]
fn test_combine_all_success() {
    let mut results = IndexMap::new();
    results.insert("x", Outcome::success(1));
    results.insert(
        "y",
        Outcome::success_with_warnings(2, vec![ValidationError::warning("w", "careful")]).unwrap(),
    );

    let combined = combine_validation_results(results);
    assert!(combined.is_success());
    assert_eq!(combined.value().unwrap().get("y"), Some(&2));
    assert_eq!(combined.warnings().len(), 1);
}

#[test]
fn test_success_with_warnings_preconditions() {
    assert_eq!(
        Outcome::success_with_warnings(1, vec![]).unwrap_err(),
        OutcomeError::EmptyWarnings
    );
    assert_eq!(
        Outcome::success_with_warnings(1, vec![error("hard")]).unwrap_err(),
        OutcomeError::NotAWarning("hard".into())
    );
    assert_eq!(Outcome::<i32>::failure(vec![]).unwrap_err(), OutcomeError::EmptyFailure);
}

#[test]
fn test_warnings_never_block() {
    let outcome = Outcome::from_parts(
        "value",
        vec![ValidationError::warning("vague_position", "too vague")],
    );
    assert!(outcome.is_success());
    assert!(outcome.warnings().iter().all(|w| w.severity == Severity::Warning));
}

#[test]
fn test_map_passes_failures_through() {
    let failed: Outcome<i32> = Outcome::failure(vec![error("x")]).unwrap();
    let mapped = failed.clone().map(|n| n + 1);
    assert_eq!(mapped.errors(), failed.errors());
}

#[test]
fn test_and_then_keeps_warnings_from_both_steps() {
    let first = Outcome::success_with_warnings(1, vec![ValidationError::warning("w1", "one")]).unwrap();
    let chained = first.and_then(|n| {
        Outcome::success_with_warnings(n + 1, vec![ValidationError::warning("w2", "two")]).unwrap()
    });
    let codes: Vec<_> = chained.warnings().iter().map(|w| w.code.clone()).collect();
    assert_eq!(codes, vec!["w1", "w2"]);
    assert_eq!(chained.value(), Some(&2));
}

#[test]
fn test_errors_for_field() {
    let outcome: Outcome<()> = Outcome::failure(vec![
        error("a").with_field(FieldPath::from_field("email")),
        error("b").with_field(FieldPath::from_field("name")),
    ])
    .unwrap();
    assert_eq!(outcome.errors_for_field("email").len(), 1);
    assert!(outcome.errors_for_field("phone").is_empty());
}
