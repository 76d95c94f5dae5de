use crate::surgeon;
use crate::types::{CleanResult, ConsoleMethod, DebugStatement, StatementKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Summary of one cleaning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub original_line_count: usize,
    pub cleaned_line_count: usize,
    pub lines_reduced: usize,
    pub removed_count: usize,
    pub counts_by_kind: BTreeMap<StatementKind, usize>,
}

impl Report {
    #[must_use]
    pub fn count(&self, kind: StatementKind) -> usize {
        self.counts_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "removed {} statement(s), {} -> {} lines (-{})",
            self.removed_count, self.original_line_count, self.cleaned_line_count, self.lines_reduced
        )?;

        if !self.counts_by_kind.is_empty() {
            let parts: Vec<String> = self
                .counts_by_kind
                .iter()
                .map(|(kind, count)| format!("{kind}: {count}"))
                .collect();
            write!(f, " [{}]", parts.join(", "))?;
        }
        Ok(())
    }
}

/// Line counts and per-kind tallies for a finished run
pub fn report(original_text: &str, result: &CleanResult) -> Report {
    let original_line_count = original_text.lines().count();
    let cleaned_line_count = result.clean_text.lines().count();

    let mut counts_by_kind = BTreeMap::new();
    for statement in &result.removed_statements {
        *counts_by_kind.entry(statement.kind).or_insert(0) += 1;
    }

    Report {
        original_line_count,
        cleaned_line_count,
        lines_reduced: original_line_count.saturating_sub(cleaned_line_count),
        removed_count: result.removed_count,
        counts_by_kind,
    }
}

/// What cleaning will do to a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewAction {
    RemoveEntireLine,
    RemoveStatement,
}

impl PreviewAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RemoveEntireLine => "remove entire line",
            Self::RemoveStatement => "remove statement",
        }
    }
}

impl fmt::Display for PreviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
    pub line: usize,
    pub kind: StatementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_kind: Option<ConsoleMethod>,
    pub raw_text: String,
    pub action: PreviewAction,
}

impl fmt::Display for PreviewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.sub_kind {
            Some(method) => format!("console.{method}"),
            None => self.kind.to_string(),
        };
        write!(
            f,
            "L{:<5} {:<20} {:<20} {}",
            self.line,
            label,
            self.action,
            truncate_one_line(&self.raw_text, 60)
        )
    }
}

/// Planned change per statement, ascending by line
pub fn preview(text: &str, statements: &[DebugStatement]) -> Vec<PreviewEntry> {
    let whole_lines = surgeon::whole_line_removals(text, statements);
    let mut entries: Vec<PreviewEntry> = statements
        .iter()
        .zip(whole_lines)
        .map(|(statement, whole_line)| {
            let action = if whole_line {
                PreviewAction::RemoveEntireLine
            } else {
                PreviewAction::RemoveStatement
            };
            PreviewEntry {
                line: statement.line,
                kind: statement.kind,
                sub_kind: statement.sub_kind,
                raw_text: statement.raw_text.clone(),
                action,
            }
        })
        .collect();

    entries.sort_by_key(|entry| entry.line);
    entries
}

fn truncate_one_line(text: &str, max_chars: usize) -> String {
    let first = text.lines().next().unwrap_or_default();
    let mut out: String = first.chars().take(max_chars).collect();
    if out.len() < text.len() {
        out.push('…');
    }
    out
}
