use super::*;
use std::panic::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    Pass,
    Fail,
}

impl OutcomeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

/// Where an assertion was evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// The test function, when the assertion object was bound to one.
    pub function: Option<String>,
}

impl CallSite {
    pub(crate) fn from_location(location: &Location<'_>, function: Option<&str>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
            function: function.map(str::to_string),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)?;
        if let Some(function) = &self.function {
            write!(f, " in {function}")?;
        }
        Ok(())
    }
}

/// The result of one assertion call. Built once, then handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    status: OutcomeStatus,
    operation: &'static str,
    location: CallSite,
    message: String,
    diagnosis: Option<String>,
    stack: Option<String>,
}

impl OutcomeRecord {
    pub(crate) fn new(
        status: OutcomeStatus,
        operation: &'static str,
        location: CallSite,
        message: &str,
        diagnosis: Option<String>,
        stack: Option<String>,
    ) -> Self {
        Self {
            status,
            operation,
            location,
            message: message.to_string(),
            diagnosis,
            stack,
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    pub fn passed(&self) -> bool {
        self.status == OutcomeStatus::Pass
    }

    /// The assertion operation, e.g. `deep_equal`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn location(&self) -> &CallSite {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn diagnosis(&self) -> Option<&str> {
        self.diagnosis.as_deref()
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

impl fmt::Display for OutcomeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.status.as_str(),
            self.operation,
            self.location
        )?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(diagnosis) = &self.diagnosis {
            write!(f, " ({diagnosis})")?;
        }
        Ok(())
    }
}
