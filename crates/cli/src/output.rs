use serde::Serialize;
use std::fmt::Write as _;
use sweep_core::{Dialect, PreviewEntry, ScanMethod, ScanOutcome};

use crate::batch::{BatchSummary, WriteMode};

/// JSON body of `preview --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewOutput<'a> {
    pub(crate) path: String,
    pub(crate) dialect: Dialect,
    #[serde(flatten)]
    pub(crate) method: &'a ScanMethod,
    pub(crate) entries: &'a [PreviewEntry],
}

/// JSON body of `scan --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScanOutput<'a> {
    pub(crate) path: String,
    pub(crate) dialect: Dialect,
    #[serde(flatten)]
    pub(crate) outcome: &'a ScanOutcome,
}

pub(crate) fn render_batch(summary: &BatchSummary, mode: WriteMode) -> String {
    let verb = match mode {
        WriteMode::Write => "cleaned",
        WriteMode::DryRun => "would clean",
    };

    let mut out = String::new();
    for file in &summary.files {
        if let Some(error) = &file.error {
            let _ = writeln!(out, "error {}: {error}", file.path);
            continue;
        }
        if !file.changed {
            continue;
        }
        let _ = writeln!(
            out,
            "{verb} {}: removed {} statement(s), -{} line(s){}",
            file.path,
            file.removed_count,
            file.lines_reduced,
            if file.lexical { " [lexical]" } else { "" }
        );
    }

    let _ = write!(
        out,
        "{} of {} file(s) {}, {} statement(s) removed",
        summary.files_changed,
        summary.files_scanned,
        match mode {
            WriteMode::Write => "changed",
            WriteMode::DryRun => "would change",
        },
        summary.statements_removed
    );
    if summary.errors > 0 {
        let _ = write!(out, ", {} error(s)", summary.errors);
    }
    if summary.cancelled {
        out.push_str(" (interrupted)");
    }
    out
}

pub(crate) fn render_preview(path: &str, entries: &[PreviewEntry]) -> String {
    if entries.is_empty() {
        return format!("{path}: nothing to remove");
    }

    let mut out = format!("{path}: {} statement(s) to remove", entries.len());
    for entry in entries {
        let _ = write!(out, "\n  {entry}");
    }
    out
}

pub(crate) fn render_scan(path: &str, outcome: &ScanOutcome) -> String {
    let method = match &outcome.method {
        ScanMethod::Structural => "structural".to_string(),
        ScanMethod::Lexical { reason } => format!("lexical ({reason})"),
    };

    let mut out = format!(
        "{path}: {} statement(s), {method} scan",
        outcome.statements.len()
    );
    for statement in &outcome.statements {
        let first_line = statement.raw_text.lines().next().unwrap_or_default();
        let _ = write!(
            out,
            "\n  {}:{} {} {}",
            statement.line,
            statement.column,
            statement.label(),
            first_line
        );
    }
    out
}
