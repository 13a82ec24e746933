use super::*;

fn failing_body(assert: &Assert, after: &mut Vec<&'static str>) -> Result<()> {
    after.push("before");
    assert.equal(&Value::from(1), &Value::from(2), "mismatch")?;
    after.push("after");
    Ok(())
}

#[test]
fn failed_assert_aborts_the_rest_of_the_body() {
    let (recorder, assert) = recorder_with_assert();
    let mut steps = Vec::new();

    let err = failing_body(&assert, &mut steps).expect_err("fatal assertion must abort");
    assert_eq!(steps, vec!["before"]);
    match err {
        Error::AssertionAborted { message, file, .. } => {
            assert_eq!(message, "mismatch");
            assert!(file.ends_with("assert_abort.rs"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(recorder.borrow().fail_count(), 1);
}

#[test]
fn passing_asserts_record_and_return_ok() -> Result<()> {
    let (recorder, assert) = recorder_with_assert();
    assert.pass("pass")?;
    assert.ok(&Value::from(1), "truthy")?;
    assert.equal(&Value::from("a"), &Value::from("a"), "equal")?;
    assert.not_equal(&Value::from("a"), &Value::from("b"), "not equal")?;
    assert.deep_equal(&obj(vec![("a", 1.into())]), &obj(vec![("a", 1.into())]), "deep")?;
    assert.not_deep_equal(&obj(vec![("a", 1.into())]), &obj(vec![]), "not deep")?;
    assert.matches("hello world", &Pattern::new("world")?, "match")?;
    assert.not_matches("hello world", &Pattern::new("xyz")?, "no match")?;
    assert.contain(&Value::from("hello"), &Value::from("ell"), "contain")?;
    assert.not_contain(&Value::from("hello"), &Value::from("xyz"), "not contain")?;
    assert.throws(|| "x".parse::<i32>(), "throws")?;
    assert.does_not_throw(|| "7".parse::<i32>(), "quiet")?;

    assert_eq!(recorder.borrow().pass_count(), 12);
    assert_eq!(recorder.borrow().fail_count(), 0);
    Ok(())
}

#[test]
fn abort_line_matches_the_failed_call() {
    let (recorder, assert) = recorder_with_assert();
    let line = line!() + 1;
    let result = assert.fail("stop");

    assert_eq!(
        result,
        Err(Error::AssertionAborted {
            message: "stop".into(),
            file: recorder.borrow().records()[0].location().file.clone(),
            line,
        })
    );
}

#[test]
fn empty_message_falls_back_to_diagnosis() {
    let (_recorder, assert) = recorder_with_assert();
    let err = assert
        .equal(&Value::from(true), &Value::from(false), "")
        .expect_err("must fail");
    let Error::AssertionAborted { message, .. } = err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(message, "got 'true', expected 'false'");

    let err = assert.fail("").expect_err("must fail");
    let Error::AssertionAborted { message, .. } = err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(message, "fail failed");
}

#[test]
fn abort_displays_message_and_location() {
    let err = Error::AssertionAborted {
        message: "mismatch".into(),
        file: "tests/search.rs".into(),
        line: 42,
    };
    assert_eq!(err.to_string(), "assertion failed: mismatch (tests/search.rs:42)");
    assert!(err.is_assertion_abort());
    assert!(!Error::InvalidPattern("x".into()).is_assertion_abort());
}
