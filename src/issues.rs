//! Issue types for extraction and translation runs.
//!
//! A run over many stream files keeps going when one file fails: the
//! failure becomes an [`Issue`] that the reporter prints alongside the
//! extracted messages.

use enum_dispatch::enum_dispatch;

use crate::core::error::I18nError;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    MessageError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::MessageError => write!(f, "message-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Stream file could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Extraction stopped part-way through a stream file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageErrorIssue {
    pub file_path: String,
    /// Line of the offending message, when the error knows it.
    pub line: Option<usize>,
    pub error: I18nError,
}

impl MessageErrorIssue {
    pub fn new(file_path: impl Into<String>, error: I18nError) -> Self {
        let line = match &error {
            I18nError::MissingParameter { line, .. } => Some(*line),
            _ => None,
        };
        Self {
            file_path: file_path.into(),
            line,
            error,
        }
    }

    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MessageError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    MessageError(MessageErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::MessageError(_) => MessageErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::MessageError(_) => MessageErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A line inside a stream file.
    Line { path: &'a str, line: usize },
    /// File-level only.
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn path(&self) -> &str {
        match self {
            ReportLocation::Line { path, .. } | ReportLocation::File { path } => path,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Line { line, .. } => *line,
            ReportLocation::File { .. } => 0,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MessageErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        match self.line {
            Some(line) => ReportLocation::Line {
                path: &self.file_path,
                line,
            },
            None => ReportLocation::File {
                path: &self.file_path,
            },
        }
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.error {
            I18nError::MissingParameter { .. } => {
                Some("name every embedded expression in the i18n:msg parameter list")
            }
            I18nError::InvalidDirective { .. } => Some("check the directive's attribute value"),
            _ => None,
        }
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.path()
            .cmp(b.path())
            .then_with(|| a.line().cmp(&b.line()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
