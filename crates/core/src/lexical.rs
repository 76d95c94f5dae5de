//! Pattern-based fallback scanner.
//!
//! Used when the structural scanner rejects the input or the dialect has no
//! grammar. It has no notion of strings or comments, so a `console.log(...)`
//! inside a string literal is reported like any other, and paren balancing
//! counts parentheses that appear inside quoted arguments.

use crate::lines::{extend_past_terminator, LineIndex};
use crate::types::{ConsoleMethod, DebugStatement, StatementKind};
use once_cell::sync::Lazy;
use regex::Regex;

static CONSOLE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bconsole\.(timeEnd|time|log|debug|info|warn|error|trace|table)\s*\(")
        .expect("valid console pattern")
});

static PRINT_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bprint\s*\(").expect("valid print pattern"));

static SYSTEM_OUT_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bSystem\.out\.println\s*\(").expect("valid System.out pattern"));

static DEBUGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdebugger\b(?:\s*;)?").expect("valid debugger pattern"));

/// Find debug statements by pattern matching. Never fails.
pub fn scan_lexical(text: &str) -> Vec<DebugStatement> {
    let index = LineIndex::new(text);
    let mut found = Vec::new();

    for caps in CONSOLE_CALL.captures_iter(text) {
        let (Some(call), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if is_member_or_identifier_tail(text, call.start()) {
            continue;
        }
        let method = ConsoleMethod::from_name(name.as_str());
        if let Some(end) = call_end(text, call.end() - 1) {
            found.push(DebugStatement::from_span(
                text,
                &index,
                StatementKind::Console,
                method,
                call.start()..end,
            ));
        }
    }

    for call in PRINT_CALL.find_iter(text) {
        if is_member_or_identifier_tail(text, call.start()) {
            continue;
        }
        if let Some(end) = call_end(text, call.end() - 1) {
            found.push(DebugStatement::from_span(
                text,
                &index,
                StatementKind::Print,
                None,
                call.start()..end,
            ));
        }
    }

    for call in SYSTEM_OUT_CALL.find_iter(text) {
        if is_member_or_identifier_tail(text, call.start()) {
            continue;
        }
        if let Some(end) = call_end(text, call.end() - 1) {
            found.push(DebugStatement::from_span(
                text,
                &index,
                StatementKind::SystemOut,
                None,
                call.start()..end,
            ));
        }
    }

    for keyword in DEBUGGER.find_iter(text) {
        if is_member_or_identifier_tail(text, keyword.start()) {
            continue;
        }
        found.push(DebugStatement::from_span(
            text,
            &index,
            StatementKind::Debugger,
            None,
            keyword.range(),
        ));
    }

    found.sort_by_key(|s| (s.start_offset, std::cmp::Reverse(s.end_offset)));
    drop_overlapping(found)
}

/// End of the call whose `(` sits at `open`, past an optional terminator
fn call_end(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (idx, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(extend_past_terminator(text, open + idx + 1));
                }
            }
            _ => {}
        }
    }

    None
}

/// `obj.print(`, `$console.log(` or `$debugger` are not the patterns we are after
fn is_member_or_identifier_tail(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c == '.' || c == '$' || c == '_' || c.is_alphanumeric())
}

fn drop_overlapping(sorted: Vec<DebugStatement>) -> Vec<DebugStatement> {
    let mut kept: Vec<DebugStatement> = Vec::with_capacity(sorted.len());

    for statement in sorted {
        if let Some(last) = kept.last() {
            if statement.start_offset < last.end_offset {
                log::debug!(
                    "dropping {} at line {} nested in {}",
                    statement.label(),
                    statement.line,
                    last.label()
                );
                continue;
            }
        }
        kept.push(statement);
    }

    kept
}
