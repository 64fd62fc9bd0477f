use vitae::resume::work_schema;
use vitae::schema::{DATE_FORMAT_MESSAGE, END_BEFORE_START_MESSAGE, URL_SCHEME_MESSAGE};
use vitae::{codes, FieldPath, Layer, Schema, ValidationResult};
use serde_json::{json, Value};
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

fn work(extra: Value) -> Value {
    let mut base = json!({"name": "Acme Inc", "position": "Developer", "startDate": "2020-01-01"});
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    base
}

fn validate_work(data: &Value) -> ValidationResult<serde_json::Map<String, Value>> {
    work_schema().validate(data, &FieldPath::root())
}

#[test]
fn test_work_entry_valid() {
    assert!(validate_work(&work(json!({}))).is_success());
}

#[test]
fn test_work_start_date_wrong_shape() {
    let errors = unwrap_failure(validate_work(&work(json!({"startDate": "01-01-2020"}))));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, DATE_FORMAT_MESSAGE);
    assert_eq!(errors.first().message, "Date must be in YYYY-MM-DD format");
    assert_eq!(errors.first().code, codes::date::INVALID_FORMAT);
    assert_eq!(errors.first().layer, Layer::Domain);
}

#[test]
fn test_work_start_date_not_a_calendar_date() {
    for bad in ["2020-13-01", "2020-02-30", "2021-04-40"] {
        let errors = unwrap_failure(validate_work(&work(json!({"startDate": bad}))));
        assert_eq!(errors.first().code, codes::date::INVALID_VALUE, "{}", bad);
    }
}

#[test]
fn test_work_end_before_start() {
    let errors = unwrap_failure(validate_work(&work(json!({"endDate": "2019-12-31"}))));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, END_BEFORE_START_MESSAGE);
    assert_eq!(errors.first().message, "End date must be after or equal to start date");
    assert_eq!(errors.first().field.as_deref(), Some("endDate"));
}

#[test]
fn test_work_url_scheme() {
    let errors = unwrap_failure(validate_work(&work(json!({"url": "ftp://acme.com"}))));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, URL_SCHEME_MESSAGE);
    assert_eq!(errors.first().message, "URL must start with http:// or https://");
}

#[test]
fn test_work_url_unparseable() {
    let errors = unwrap_failure(validate_work(&work(json!({"url": "acme dot com"}))));
    assert_eq!(errors.first().code, codes::url::INVALID);
    assert_eq!(errors.first().message, "Invalid URL format");
}

#[test]
fn test_work_unknown_key_rejected() {
    let errors = unwrap_failure(validate_work(&work(json!({"salary": 100000}))));
    assert_eq!(errors.first().code, codes::shape::UNKNOWN_FIELD);
    assert_eq!(errors.first().field.as_deref(), Some("salary"));
}

#[test]
fn test_every_failing_rule_reported() {
    let errors = unwrap_failure(validate_work(&json!({
        "name": "   ",
        "startDate": "2020/01/01",
        "url": "ftp://acme.com",
        "salary": 1
    })));

    let fields: Vec<_> = errors.iter().filter_map(|e| e.field.clone()).collect();
    assert_eq!(fields, vec!["name", "position", "startDate", "url", "salary"]);
}

#[test]
fn test_nested_section_paths() {
    let schema = Schema::object().optional("work", Schema::array(work_schema()));
    let errors = unwrap_failure(schema.validate(
        &json!({"work": [work(json!({})), work(json!({"startDate": "2020-01-01", "endDate": "2019-01-01"}))]}),
        &FieldPath::root(),
    ));
    assert_eq!(errors.first().field.as_deref(), Some("work[1].endDate"));
}

#[test]
fn test_optional_blank_values_skip_format_checks() {
    let result = validate_work(&work(json!({"url": "", "endDate": null, "summary": "  "})));
    assert!(result.is_success());
}
