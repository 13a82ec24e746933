//! Predicates shared by [`Expect`] and [`Assert`]. Each one only decides the
//! outcome and its diagnosis; routing to the sink happens in the reporter.

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Verdict {
    pub(crate) passed: bool,
    pub(crate) diagnosis: Option<String>,
}

impl Verdict {
    fn new(passed: bool, diagnosis: String) -> Self {
        Self {
            passed,
            diagnosis: Some(diagnosis),
        }
    }

    pub(crate) fn bare(passed: bool) -> Self {
        Self {
            passed,
            diagnosis: None,
        }
    }
}

fn got_expected(value: &Value, expected: &Value) -> String {
    format!("got '{value}', expected '{expected}'")
}

fn got_expected_not(value: &Value, expected: &Value) -> String {
    format!("got '{value}', expected not '{expected}'")
}

pub(crate) fn ok(value: &Value) -> Verdict {
    Verdict::new(value.truthy(), format!("got '{value}'"))
}

pub(crate) fn equal(value: &Value, expected: &Value) -> Verdict {
    Verdict::new(value.strict_equal(expected), got_expected(value, expected))
}

pub(crate) fn not_equal(value: &Value, expected: &Value) -> Verdict {
    Verdict::new(
        !value.strict_equal(expected),
        got_expected_not(value, expected),
    )
}

pub(crate) fn deep_equal(value: &Value, expected: &Value) -> Verdict {
    Verdict::new(
        super::deep_equal(value, expected),
        got_expected(value, expected),
    )
}

pub(crate) fn not_deep_equal(value: &Value, expected: &Value) -> Verdict {
    Verdict::new(
        !super::deep_equal(value, expected),
        got_expected_not(value, expected),
    )
}

pub(crate) fn matches(string: &str, pattern: &Pattern) -> Verdict {
    match pattern.is_match(string) {
        Ok(matched) => Verdict::new(matched, format!("'{string}' should match '{pattern}'")),
        Err(err) => Verdict::new(
            false,
            format!("'{string}' could not be tested against '{pattern}': {err}"),
        ),
    }
}

pub(crate) fn not_matches(string: &str, pattern: &Pattern) -> Verdict {
    match pattern.is_match(string) {
        Ok(matched) => Verdict::new(
            !matched,
            format!("'{string}' should not match '{pattern}'"),
        ),
        Err(err) => Verdict::new(
            false,
            format!("'{string}' could not be tested against '{pattern}': {err}"),
        ),
    }
}

/// `None` when `value` is neither a string nor a sequence.
fn containment(value: &Value, needle: &Value) -> Option<bool> {
    match value {
        Value::String(haystack) => Some(
            needle
                .as_str()
                .is_some_and(|needle| haystack.contains(needle)),
        ),
        Value::Array(array) | Value::Arguments(array) => Some(
            array
                .borrow()
                .iter()
                .any(|element| element.strict_equal(needle)),
        ),
        _ => None,
    }
}

pub(crate) fn contain(value: &Value, needle: &Value) -> Verdict {
    match containment(value, needle) {
        Some(found) => Verdict::new(found, format!("'{value}' should contain '{needle}'")),
        None => Verdict::new(
            false,
            format!("cannot search a {} for '{needle}'", value.type_name()),
        ),
    }
}

pub(crate) fn not_contain(value: &Value, needle: &Value) -> Verdict {
    match containment(value, needle) {
        Some(found) => Verdict::new(
            !found,
            format!("'{value}' should not contain '{needle}'"),
        ),
        None => Verdict::new(
            false,
            format!("cannot search a {} for '{needle}'", value.type_name()),
        ),
    }
}

pub(crate) fn throws<T, E: fmt::Debug>(result: &std::result::Result<T, E>) -> Verdict {
    match result {
        Ok(_) => Verdict::new(false, "expected an error, got Ok".to_string()),
        Err(err) => Verdict::new(true, format!("raised {err:?}")),
    }
}

pub(crate) fn does_not_throw<T, E: fmt::Debug>(result: &std::result::Result<T, E>) -> Verdict {
    match result {
        Ok(_) => Verdict::new(true, "returned Ok".to_string()),
        Err(err) => Verdict::new(false, format!("unexpected error {err:?}")),
    }
}
