use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    /// Soft failures only; the body ran to completion.
    Failed,
    /// A fatal assertion stopped the body.
    Aborted(Error),
    /// The body returned an error that is not an assertion abort.
    Errored(Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    pub name: String,
    pub passed: usize,
    pub failed: usize,
    pub status: TestStatus,
}

impl TestReport {
    pub fn is_success(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// The assertion handles given to one test body.
#[derive(Debug, Clone)]
pub struct TestContext {
    pub expect: Expect,
    pub assert: Assert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub assertions_passed: usize,
    pub assertions_failed: usize,
}

/// Runs test bodies one at a time against a shared [`Recorder`].
///
/// This is the boundary where an [`Error::AssertionAborted`] from a fatal
/// assertion stops propagating and turns into a [`TestReport`].
#[derive(Debug)]
pub struct Session {
    recorder: Rc<RefCell<Recorder>>,
    options: ReporterOptions,
    reports: Vec<TestReport>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            recorder: Recorder::shared(),
            options: ReporterOptions::default(),
            reports: Vec::new(),
        }
    }

    pub fn set_options(&mut self, options: ReporterOptions) {
        self.options = options;
    }

    pub fn recorder(&self) -> Rc<RefCell<Recorder>> {
        Rc::clone(&self.recorder)
    }

    /// Fresh handles bound to the session's recorder and to `name`.
    pub fn context(&self, name: &str) -> TestContext {
        let sink: SharedSink = self.recorder.clone();
        TestContext {
            expect: Expect::new(Rc::clone(&sink))
                .with_function(name)
                .with_options(self.options),
            assert: Assert::new(sink)
                .with_function(name)
                .with_options(self.options),
        }
    }

    pub fn run<F>(&mut self, name: &str, test: F) -> &TestReport
    where
        F: FnOnce(&TestContext) -> Result<()>,
    {
        let context = self.context(name);
        let start = self.recorder.borrow().records().len();
        let result = test(&context);

        let (passed, failed) = {
            let recorder = self.recorder.borrow();
            let records = recorder.records().get(start..).unwrap_or(&[]);
            let passed = records.iter().filter(|record| record.passed()).count();
            (passed, records.len() - passed)
        };
        let status = match result {
            Ok(()) if failed == 0 => TestStatus::Passed,
            Ok(()) => TestStatus::Failed,
            Err(err) if err.is_assertion_abort() => TestStatus::Aborted(err),
            Err(err) => TestStatus::Errored(err),
        };
        self.recorder.borrow_mut().trace_line(format!(
            "[test] {name} {} passed={passed} failed={failed}",
            status_label(&status)
        ));

        self.reports.push(TestReport {
            name: name.to_string(),
            passed,
            failed,
            status,
        });
        &self.reports[self.reports.len() - 1]
    }

    pub fn reports(&self) -> &[TestReport] {
        &self.reports
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for report in &self.reports {
            summary.tests += 1;
            if report.is_success() {
                summary.passed_tests += 1;
            } else {
                summary.failed_tests += 1;
            }
            summary.assertions_passed += report.passed;
            summary.assertions_failed += report.failed;
        }
        summary
    }
}

fn status_label(status: &TestStatus) -> &'static str {
    match status {
        TestStatus::Passed => "passed",
        TestStatus::Failed => "failed",
        TestStatus::Aborted(_) => "aborted",
        TestStatus::Errored(_) => "errored",
    }
}
