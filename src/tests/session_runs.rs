use super::*;

#[test]
fn soft_failures_mark_the_test_failed_but_run_to_completion() {
    let mut session = Session::new();
    let mut finished = false;
    let report = session.run("search_engine_manager", |ctx| {
        ctx.expect.equal(&Value::from(1), &Value::from(2), "first");
        ctx.expect.ok(&Value::Null, "second");
        ctx.expect.pass("third");
        finished = true;
        Ok(())
    });

    assert_eq!(report.status, TestStatus::Failed);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 2);
    assert!(finished);
}

#[test]
fn fatal_failure_aborts_and_is_reported() {
    let mut session = Session::new();
    let mut after_abort = false;
    let report = session.run("identity_popup", |ctx| {
        ctx.expect.pass("setup");
        ctx.assert.equal(&Value::from(1), &Value::from(2), "mismatch")?;
        after_abort = true;
        Ok(())
    });

    assert!(!after_abort);
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);
    match &report.status {
        TestStatus::Aborted(Error::AssertionAborted { message, .. }) => {
            assert_eq!(message, "mismatch");
        }
        other => panic!("unexpected status: {other:?}"),
    }
}

#[test]
fn other_errors_are_reported_as_errored() {
    let mut session = Session::new();
    let report = session.run("bad_pattern", |ctx| {
        let pattern = Pattern::new("(")?;
        ctx.expect.matches("x", &pattern, "never reached");
        Ok(())
    });
    assert!(matches!(
        report.status,
        TestStatus::Errored(Error::InvalidPattern(_))
    ));
    assert_eq!(report.passed + report.failed, 0);
}

#[test]
fn records_carry_the_test_name() {
    let mut session = Session::new();
    session.run("tab_view_toggle", |ctx| {
        ctx.expect.pass("inside");
        Ok(())
    });
    let recorder = session.recorder();
    let recorder = recorder.borrow();
    assert_eq!(
        recorder.records()[0].location().function.as_deref(),
        Some("tab_view_toggle")
    );
}

#[test]
fn summary_totals_all_runs() {
    let mut session = Session::new();
    session.run("passes", |ctx| {
        ctx.expect.pass("a");
        ctx.assert.pass("b")
    });
    session.run("soft", |ctx| {
        ctx.expect.fail("c");
        Ok(())
    });
    session.run("fatal", |ctx| ctx.assert.fail("d"));

    assert_eq!(
        session.summary(),
        SessionSummary {
            tests: 3,
            passed_tests: 1,
            failed_tests: 2,
            assertions_passed: 2,
            assertions_failed: 2,
        }
    );
    let names = session
        .reports()
        .iter()
        .map(|report| report.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["passes", "soft", "fatal"]);
    assert!(session.reports()[0].is_success());
}

#[test]
fn session_traces_test_outcomes() {
    let mut session = Session::new();
    {
        let recorder = session.recorder();
        let mut recorder = recorder.borrow_mut();
        recorder.set_trace(true);
        recorder.set_trace_stderr(false);
    }
    session.run("fatal", |ctx| ctx.assert.fail("stop"));

    let logs = session.recorder().borrow_mut().take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].starts_with("[assert] FAIL fail"));
    assert_eq!(logs[1], "[test] fatal aborted passed=0 failed=1");
}

#[test]
fn session_options_reach_every_context() {
    let mut session = Session::new();
    session.set_options(ReporterOptions {
        capture_stack: true,
        diagnosis_limit: 5,
    });
    let ctx = session.context("configured");
    assert_eq!(ctx.expect.options().diagnosis_limit, 5);
    assert!(ctx.assert.options().capture_stack);
    assert_eq!(ctx.assert.function(), Some("configured"));
}
