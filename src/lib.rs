use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt as JsBigInt;
use num_traits::Zero;

mod assert;
mod checks;
mod deep_equal;
mod expect;
mod outcome;
mod pattern;
mod reporter;
mod session;
mod sink;
mod value;
mod value_format;

pub use assert::Assert;
pub use deep_equal::deep_equal;
pub use expect::Expect;
pub use outcome::{CallSite, OutcomeRecord, OutcomeStatus};
pub use pattern::Pattern;
pub use reporter::ReporterOptions;
pub use session::{Session, SessionSummary, TestContext, TestReport, TestStatus};
pub use sink::{AssertionSink, Recorder, SharedSink};
pub use value::{ArrayValue, ObjectValue, Value};

use checks::Verdict;
use reporter::Reporter;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    AssertionAborted {
        message: String,
        file: String,
        line: u32,
    },
    InvalidPattern(String),
    InvalidOption(String),
}

impl Error {
    /// True for the abort signal raised by a failed fatal assertion.
    pub fn is_assertion_abort(&self) -> bool {
        matches!(self, Self::AssertionAborted { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssertionAborted {
                message,
                file,
                line,
            } => write!(f, "assertion failed: {message} ({file}:{line})"),
            Self::InvalidPattern(msg) => write!(f, "invalid pattern: {msg}"),
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
        }
    }
}

impl StdError for Error {}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests;
