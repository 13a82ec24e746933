use super::*;

/// Soft assertions: every check is recorded and returns its result, and a
/// failure never stops the calling test.
///
/// ```
/// use ui_assertions::{Expect, Recorder, Value};
///
/// let recorder = Recorder::shared();
/// let expect = Expect::new(recorder.clone());
/// assert!(!expect.equal(&Value::from(1), &Value::from(2), "mismatch"));
/// assert!(expect.ok(&Value::from("still running"), "continues"));
/// assert_eq!(recorder.borrow().fail_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Expect {
    reporter: Reporter,
}

impl Expect {
    pub fn new(sink: SharedSink) -> Self {
        Self {
            reporter: Reporter::new(sink),
        }
    }

    /// Names the test function in every record's call site.
    pub fn with_function(mut self, function: &str) -> Self {
        self.reporter.set_function(function);
        self
    }

    pub fn with_options(mut self, options: ReporterOptions) -> Self {
        self.reporter.set_options(options);
        self
    }

    pub fn function(&self) -> Option<&str> {
        self.reporter.function()
    }

    pub fn options(&self) -> ReporterOptions {
        self.reporter.options()
    }

    #[track_caller]
    pub fn pass(&self, message: &str) -> bool {
        self.check("pass", message, Verdict::bare(true))
    }

    #[track_caller]
    pub fn fail(&self, message: &str) -> bool {
        self.check("fail", message, Verdict::bare(false))
    }

    #[track_caller]
    pub fn ok(&self, value: &Value, message: &str) -> bool {
        self.check("ok", message, checks::ok(value))
    }

    #[track_caller]
    pub fn equal(&self, value: &Value, expected: &Value, message: &str) -> bool {
        self.check("equal", message, checks::equal(value, expected))
    }

    #[track_caller]
    pub fn not_equal(&self, value: &Value, expected: &Value, message: &str) -> bool {
        self.check("not_equal", message, checks::not_equal(value, expected))
    }

    #[track_caller]
    pub fn deep_equal(&self, value: &Value, expected: &Value, message: &str) -> bool {
        self.check("deep_equal", message, checks::deep_equal(value, expected))
    }

    #[track_caller]
    pub fn not_deep_equal(&self, value: &Value, expected: &Value, message: &str) -> bool {
        self.check(
            "not_deep_equal",
            message,
            checks::not_deep_equal(value, expected),
        )
    }

    #[track_caller]
    pub fn matches(&self, string: &str, pattern: &Pattern, message: &str) -> bool {
        self.check("matches", message, checks::matches(string, pattern))
    }

    #[track_caller]
    pub fn not_matches(&self, string: &str, pattern: &Pattern, message: &str) -> bool {
        self.check("not_matches", message, checks::not_matches(string, pattern))
    }

    /// Substring search for strings, strict element search for sequences.
    #[track_caller]
    pub fn contain(&self, value: &Value, needle: &Value, message: &str) -> bool {
        self.check("contain", message, checks::contain(value, needle))
    }

    #[track_caller]
    pub fn not_contain(&self, value: &Value, needle: &Value, message: &str) -> bool {
        self.check("not_contain", message, checks::not_contain(value, needle))
    }

    /// Runs `block` and passes when it returns `Err`.
    #[track_caller]
    pub fn throws<T, E: fmt::Debug>(
        &self,
        block: impl FnOnce() -> std::result::Result<T, E>,
        message: &str,
    ) -> bool {
        let result = block();
        self.check("throws", message, checks::throws(&result))
    }

    #[track_caller]
    pub fn does_not_throw<T, E: fmt::Debug>(
        &self,
        block: impl FnOnce() -> std::result::Result<T, E>,
        message: &str,
    ) -> bool {
        let result = block();
        self.check("does_not_throw", message, checks::does_not_throw(&result))
    }

    #[track_caller]
    fn check(&self, operation: &'static str, message: &str, verdict: Verdict) -> bool {
        self.reporter.report(operation, message, verdict).passed()
    }
}
