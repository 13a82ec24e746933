use super::*;

/// Fatal assertions: same checks as [`Expect`], but a failure returns
/// [`Error::AssertionAborted`] so the test body stops at the next `?`.
#[derive(Debug, Clone)]
pub struct Assert {
    reporter: Reporter,
}

impl Assert {
    pub fn new(sink: SharedSink) -> Self {
        Self {
            reporter: Reporter::new(sink),
        }
    }

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
    pub fn pass(&self, message: &str) -> Result<()> {
        self.check("pass", message, Verdict::bare(true))
    }

    #[track_caller]
    pub fn fail(&self, message: &str) -> Result<()> {
        self.check("fail", message, Verdict::bare(false))
    }

    #[track_caller]
    pub fn ok(&self, value: &Value, message: &str) -> Result<()> {
        self.check("ok", message, checks::ok(value))
    }

    #[track_caller]
    pub fn equal(&self, value: &Value, expected: &Value, message: &str) -> Result<()> {
        self.check("equal", message, checks::equal(value, expected))
    }

    #[track_caller]
    pub fn not_equal(&self, value: &Value, expected: &Value, message: &str) -> Result<()> {
        self.check("not_equal", message, checks::not_equal(value, expected))
    }

    #[track_caller]
    pub fn deep_equal(&self, value: &Value, expected: &Value, message: &str) -> Result<()> {
        self.check("deep_equal", message, checks::deep_equal(value, expected))
    }

    #[track_caller]
    pub fn not_deep_equal(&self, value: &Value, expected: &Value, message: &str) -> Result<()> {
        self.check(
            "not_deep_equal",
            message,
            checks::not_deep_equal(value, expected),
        )
    }

    #[track_caller]
    pub fn matches(&self, string: &str, pattern: &Pattern, message: &str) -> Result<()> {
        self.check("matches", message, checks::matches(string, pattern))
    }

    #[track_caller]
    pub fn not_matches(&self, string: &str, pattern: &Pattern, message: &str) -> Result<()> {
        self.check("not_matches", message, checks::not_matches(string, pattern))
    }

    #[track_caller]
    pub fn contain(&self, value: &Value, needle: &Value, message: &str) -> Result<()> {
        self.check("contain", message, checks::contain(value, needle))
    }

    #[track_caller]
    pub fn not_contain(&self, value: &Value, needle: &Value, message: &str) -> Result<()> {
        self.check("not_contain", message, checks::not_contain(value, needle))
    }

    #[track_caller]
    pub fn throws<T, E: fmt::Debug>(
        &self,
        block: impl FnOnce() -> std::result::Result<T, E>,
        message: &str,
    ) -> Result<()> {
        let result = block();
        self.check("throws", message, checks::throws(&result))
    }

    #[track_caller]
    pub fn does_not_throw<T, E: fmt::Debug>(
        &self,
        block: impl FnOnce() -> std::result::Result<T, E>,
        message: &str,
    ) -> Result<()> {
        let result = block();
        self.check("does_not_throw", message, checks::does_not_throw(&result))
    }

    #[track_caller]
    fn check(&self, operation: &'static str, message: &str, verdict: Verdict) -> Result<()> {
        let record = self.reporter.report(operation, message, verdict);
        if record.passed() {
            return Ok(());
        }
        Err(abort_signal(&record))
    }
}

fn abort_signal(record: &OutcomeRecord) -> Error {
    let message = if !record.message().is_empty() {
        record.message().to_string()
    } else if let Some(diagnosis) = record.diagnosis() {
        diagnosis.to_string()
    } else {
        format!("{} failed", record.operation())
    };
    Error::AssertionAborted {
        message,
        file: record.location().file.clone(),
        line: record.location().line,
    }
}
