use crate::lines::LineIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Family a debug statement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    /// `console.<method>(...)`
    Console,
    /// `debugger` breakpoint statement
    Debugger,
    /// Bare `print(...)`
    Print,
    /// `System.out.println(...)`
    SystemOut,
}

impl StatementKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Debugger => "debugger",
            Self::Print => "print",
            Self::SystemOut => "system-out",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console method that marks a call as a console statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsoleMethod {
    Log,
    Debug,
    Info,
    Warn,
    Error,
    Trace,
    Table,
    Time,
    TimeEnd,
}

impl ConsoleMethod {
    pub const ALL: [Self; 9] = [
        Self::Log,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Trace,
        Self::Table,
        Self::Time,
        Self::TimeEnd,
    ];

    /// Match a property name exactly as written in source
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "log" => Some(Self::Log),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "trace" => Some(Self::Trace),
            "table" => Some(Self::Table),
            "time" => Some(Self::Time),
            "timeEnd" => Some(Self::TimeEnd),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Trace => "trace",
            Self::Table => "table",
            Self::Time => "time",
            Self::TimeEnd => "timeEnd",
        }
    }
}

impl fmt::Display for ConsoleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located debug statement
///
/// Offsets are a half-open byte range into the text the statement was scanned
/// from. They are never rewritten after scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugStatement {
    pub kind: StatementKind,

    /// Console method, present only for console statements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_kind: Option<ConsoleMethod>,

    pub start_offset: usize,

    /// Exclusive; includes an immediately trailing `;`
    pub end_offset: usize,

    /// 1-indexed line of `start_offset`
    pub line: usize,

    /// 0-indexed byte column of `start_offset`
    pub column: usize,

    pub raw_text: String,

    pub line_content_trimmed: String,
}

impl DebugStatement {
    /// Build a statement record for `span` of `text`
    #[must_use]
    pub fn from_span(
        text: &str,
        index: &LineIndex,
        kind: StatementKind,
        sub_kind: Option<ConsoleMethod>,
        span: Range<usize>,
    ) -> Self {
        let (line, column) = index.line_col(span.start);
        let line_span = index.line_span(line);

        Self {
            kind,
            sub_kind,
            start_offset: span.start,
            end_offset: span.end,
            line,
            column,
            raw_text: text[span.clone()].to_string(),
            line_content_trimmed: text[line_span].trim().to_string(),
        }
    }

    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the two statements share at least one byte
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_offset < other.end_offset && other.start_offset < self.end_offset
    }

    /// Short label such as `console.warn` or `debugger`
    #[must_use]
    pub fn label(&self) -> String {
        match (self.kind, self.sub_kind) {
            (StatementKind::Console, Some(method)) => format!("console.{method}"),
            (StatementKind::SystemOut, _) => "System.out.println".to_string(),
            (kind, _) => kind.as_str().to_string(),
        }
    }
}

/// Result of one cleaning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanResult {
    pub clean_text: String,

    pub removed_count: usize,

    /// Ascending by original offset
    pub removed_statements: Vec<DebugStatement>,
}

impl CleanResult {
    /// Result that leaves `text` untouched
    #[must_use]
    pub fn unchanged(text: &str) -> Self {
        Self {
            clean_text: text.to_string(),
            removed_count: 0,
            removed_statements: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.removed_count > 0
    }
}

/// Which scanner produced a statement list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum ScanMethod {
    Structural,

    /// Pattern matching; may report matches inside strings and comments
    Lexical { reason: String },
}

impl ScanMethod {
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical { .. })
    }
}

/// Statements found in a buffer plus how they were found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub statements: Vec<DebugStatement>,

    #[serde(flatten)]
    pub method: ScanMethod,
}
