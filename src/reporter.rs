use super::*;
use std::backtrace::Backtrace;
use std::panic::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReporterOptions {
    /// Attach a captured backtrace to every record.
    pub capture_stack: bool,
    /// Diagnoses longer than this many chars are cut and end in `...`.
    pub diagnosis_limit: usize,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            capture_stack: false,
            diagnosis_limit: 200,
        }
    }
}

/// Turns a verdict into an outcome record and routes it to the sink.
#[derive(Clone)]
pub(crate) struct Reporter {
    sink: SharedSink,
    function: Option<String>,
    options: ReporterOptions,
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("function", &self.function)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Reporter {
    pub(crate) fn new(sink: SharedSink) -> Self {
        Self {
            sink,
            function: None,
            options: ReporterOptions::default(),
        }
    }

    pub(crate) fn set_function(&mut self, function: &str) {
        self.function = Some(function.to_string());
    }

    pub(crate) fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub(crate) fn set_options(&mut self, options: ReporterOptions) {
        self.options = options;
    }

    pub(crate) fn options(&self) -> ReporterOptions {
        self.options
    }

    #[track_caller]
    pub(crate) fn report(
        &self,
        operation: &'static str,
        message: &str,
        verdict: Verdict,
    ) -> OutcomeRecord {
        let location = CallSite::from_location(Location::caller(), self.function.as_deref());
        let status = if verdict.passed {
            OutcomeStatus::Pass
        } else {
            OutcomeStatus::Fail
        };
        let diagnosis = verdict
            .diagnosis
            .map(|diagnosis| truncate_chars(&diagnosis, self.options.diagnosis_limit));
        let stack = self
            .options
            .capture_stack
            .then(|| Backtrace::force_capture().to_string());
        let record = OutcomeRecord::new(status, operation, location, message, diagnosis, stack);

        let Ok(mut sink) = self.sink.try_borrow_mut() else {
            panic!(
                "assertion sink is already borrowed while recording {operation} at {}; \
                 release recorder borrows before asserting",
                record.location()
            );
        };
        match status {
            OutcomeStatus::Pass => sink.record_pass(&record),
            OutcomeStatus::Fail => sink.record_fail(&record),
        }
        record
    }
}
