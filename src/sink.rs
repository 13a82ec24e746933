use super::*;

/// Receives one record per assertion call, in call order.
pub trait AssertionSink {
    fn record_pass(&mut self, record: &OutcomeRecord);
    fn record_fail(&mut self, record: &OutcomeRecord);
}

/// Sink handle shared by every [`Expect`] and [`Assert`] of a test.
///
/// Each assertion call borrows the sink mutably while it records. A borrow of
/// the same sink that is still alive in the calling statement makes the call
/// panic with "assertion sink is already borrowed", for example
/// `expect.equal(&Value::from(recorder.borrow().fail_count() as i64), ..)`.
/// Read the recorder into a local first.
pub type SharedSink = Rc<RefCell<dyn AssertionSink>>;

#[derive(Debug)]
struct TraceState {
    enabled: bool,
    failures_only: bool,
    logs: VecDeque<String>,
    log_limit: usize,
    to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            failures_only: false,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

/// Sink that keeps every record and, when tracing is on, a bounded log of
/// formatted lines.
#[derive(Debug, Default)]
pub struct Recorder {
    records: Vec<OutcomeRecord>,
    trace_state: TraceState,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    pub fn failures(&self) -> impl Iterator<Item = &OutcomeRecord> {
        self.records.iter().filter(|record| !record.passed())
    }

    pub fn pass_count(&self) -> usize {
        self.records.iter().filter(|record| record.passed()).count()
    }

    pub fn fail_count(&self) -> usize {
        self.failures().count()
    }

    pub fn take_records(&mut self) -> Vec<OutcomeRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_state.to_stderr = enabled;
    }

    pub fn set_trace_failures_only(&mut self, enabled: bool) {
        self.trace_state.failures_only = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidOption(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    fn trace_record(&mut self, record: &OutcomeRecord) {
        if !self.trace_state.enabled {
            return;
        }
        if self.trace_state.failures_only && record.passed() {
            return;
        }
        self.trace_line(format!("[assert] {record}"));
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        if !self.trace_state.enabled {
            return;
        }
        if self.trace_state.to_stderr {
            eprintln!("{line}");
        }
        if self.trace_state.logs.len() >= self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        self.trace_state.logs.push_back(line);
    }
}

impl AssertionSink for Recorder {
    fn record_pass(&mut self, record: &OutcomeRecord) {
        self.trace_record(record);
        self.records.push(record.clone());
    }

    fn record_fail(&mut self, record: &OutcomeRecord) {
        self.trace_record(record);
        self.records.push(record.clone());
    }
}
