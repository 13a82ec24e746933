use super::*;
use std::borrow::Cow;

const FLAG_ORDER: &str = "dgimsuvy";

/// A compiled regular expression with JS-style source and flags.
///
/// `i`, `m` and `s` change how a single test behaves, and `y` anchors the match
/// at the start of the input (a fresh `lastIndex` of 0). `d`, `g`, `u` and `v`
/// are accepted and kept in [`Pattern::flags`] so diagnoses and deep-equality
/// see the pattern as it was written.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    backend: fancy_regex::Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        Self::with_flags(source, "")
    }

    pub fn with_flags(source: &str, flags: &str) -> Result<Self> {
        let mut builder = PatternBuilder::new(source);
        let mut seen = String::new();
        for flag in flags.chars() {
            if !FLAG_ORDER.contains(flag) {
                return Err(Error::InvalidPattern(format!(
                    "unknown flag '{flag}' in /{source}/{flags}"
                )));
            }
            if seen.contains(flag) {
                return Err(Error::InvalidPattern(format!(
                    "duplicate flag '{flag}' in /{source}/{flags}"
                )));
            }
            seen.push(flag);
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'y' => builder.sticky(true),
                _ => &mut builder,
            };
        }
        let canonical: String = FLAG_ORDER.chars().filter(|flag| seen.contains(*flag)).collect();
        builder.build(canonical)
    }

    /// Parses a `/source/flags` literal.
    pub fn parse_literal(literal: &str) -> Result<Self> {
        let body = literal
            .strip_prefix('/')
            .ok_or_else(|| Error::InvalidPattern(format!("missing leading '/': {literal}")))?;
        let close = body
            .rfind('/')
            .ok_or_else(|| Error::InvalidPattern(format!("missing closing '/': {literal}")))?;
        Self::with_flags(&body[..close], &body[close + 1..])
    }

    /// A pattern matching `text` literally.
    pub fn literal(text: &str) -> Result<Self> {
        Self::new(&escape(text))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub(crate) fn is_match(&self, input: &str) -> std::result::Result<bool, RegexError> {
        self.backend.is_match(input).map_err(RegexError::from)
    }

    pub(crate) fn same_pattern(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[derive(Debug, Clone)]
struct PatternBuilder {
    source: String,
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    sticky: bool,
}

impl PatternBuilder {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            sticky: false,
        }
    }

    fn case_insensitive(&mut self, enabled: bool) -> &mut Self {
        self.case_insensitive = enabled;
        self
    }

    fn multi_line(&mut self, enabled: bool) -> &mut Self {
        self.multi_line = enabled;
        self
    }

    fn dot_matches_new_line(&mut self, enabled: bool) -> &mut Self {
        self.dot_matches_new_line = enabled;
        self
    }

    fn sticky(&mut self, enabled: bool) -> &mut Self {
        self.sticky = enabled;
        self
    }

    fn build(&self, flags: String) -> Result<Pattern> {
        let backend_source = if self.sticky {
            Cow::Owned(format!(r"\A(?:{})", self.source))
        } else {
            Cow::Borrowed(self.source.as_str())
        };
        let mut builder = fancy_regex::RegexBuilder::new(&backend_source);
        builder.case_insensitive(self.case_insensitive);
        builder.multi_line(self.multi_line);
        builder.dot_matches_new_line(self.dot_matches_new_line);
        let backend = builder
            .build()
            .map_err(|err| Error::InvalidPattern(format!("/{}/{flags}: {err}", self.source)))?;
        Ok(Pattern {
            source: self.source.clone(),
            flags,
            backend,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegexError {
    message: String,
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for RegexError {}

impl From<fancy_regex::Error> for RegexError {
    fn from(value: fancy_regex::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

pub(crate) fn escape(value: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(value.len());
    let mut changed = false;

    for ch in value.chars() {
        if is_regex_meta(ch) {
            out.push('\\');
            changed = true;
        }
        out.push(ch);
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(value)
    }
}

fn is_regex_meta(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$'
    )
}
