//! Removal of located statements from the original text.
//!
//! Statements are visited right to left. Each one yields a *cut*, a byte range
//! of the original text to drop, chosen by looking at what shares the
//! statement's line. Cuts already taken for statements further right are
//! hidden while a statement's surroundings are inspected, which is what an
//! in-place right-to-left deletion would see. The output is then assembled
//! from the spans between cuts, so no offset is ever rewritten.

use crate::config::RemovalConfig;
use crate::lines::{self, is_blank, is_horizontal_space};
use crate::types::{CleanResult, DebugStatement};
use crate::whitespace;
use std::cmp::Reverse;
use std::ops::Range;

/// How a statement sits on its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineContext {
    /// Nothing but whitespace around it; the whole line goes
    Alone,
    /// First thing on the line, code follows
    Leads,
    /// Last thing on the line, code precedes
    Trails,
    /// Code on both sides
    MidLine,
}

impl LineContext {
    pub fn classify(before: &str, after: &str) -> Self {
        match (is_blank(before), is_blank(after)) {
            (true, true) => Self::Alone,
            (true, false) => Self::Leads,
            (false, true) => Self::Trails,
            (false, false) => Self::MidLine,
        }
    }

    /// Context of `statement` in the unmodified `text`
    pub fn of(text: &str, statement: &DebugStatement) -> Self {
        let line_start = lines::line_start(text, statement.start_offset);
        let line_end = lines::line_end(text, statement.end_offset);
        Self::classify(
            &text[line_start..statement.start_offset],
            &text[statement.end_offset..line_end],
        )
    }
}

/// Remove `statements` from `text` and tidy the result per `config`.
///
/// Statements that run past the end of `text`, are empty, or overlap an
/// earlier statement are skipped and not counted.
pub fn remove_all(
    text: &str,
    statements: &[DebugStatement],
    config: &RemovalConfig,
) -> CleanResult {
    if statements.is_empty() {
        return CleanResult::unchanged(text);
    }

    let accepted = accept(text, statements);
    let plan = CutPlan::build(text, statements, &accepted);

    let removed: Vec<DebugStatement> = accepted
        .iter()
        .map(|&idx| statements[idx].clone())
        .collect();

    let mut clean_text = plan.assemble();
    if config.clean_whitespace {
        clean_text = whitespace::normalize(&clean_text, config.max_empty_lines);
    }

    CleanResult {
        clean_text,
        removed_count: removed.len(),
        removed_statements: removed,
    }
}

/// For each statement, in input order, whether removing all of `statements`
/// deletes every line it occupies. Statements `remove_all` would skip get
/// `false`.
pub(crate) fn whole_line_removals(text: &str, statements: &[DebugStatement]) -> Vec<bool> {
    let accepted = accept(text, statements);
    let plan = CutPlan::build(text, statements, &accepted);

    let mut whole = vec![false; statements.len()];
    for idx in accepted {
        let statement = &statements[idx];
        let first = lines::line_start(text, statement.start_offset);
        let last = lines::line_end(text, statement.end_offset);
        whole[idx] = plan
            .cut_containing(statement.start_offset)
            .is_some_and(|cut| cut.start <= first && (cut.end > last || cut.end == text.len()));
    }
    whole
}

/// Indices of the statements that will be removed, ascending by offset
fn accept(text: &str, statements: &[DebugStatement]) -> Vec<usize> {
    let mut ordered: Vec<usize> = (0..statements.len()).collect();
    ordered.sort_by_key(|&idx| {
        let s = &statements[idx];
        (s.start_offset, Reverse(s.end_offset))
    });

    let mut accepted = Vec::with_capacity(ordered.len());
    let mut reach = 0;
    for idx in ordered {
        let statement = &statements[idx];
        if statement.is_empty() || statement.end_offset > text.len() || statement.start_offset < reach
        {
            log::debug!(
                "skipping {} at {}..{}: empty, out of bounds or overlapping",
                statement.label(),
                statement.start_offset,
                statement.end_offset
            );
            continue;
        }
        reach = statement.end_offset;
        accepted.push(idx);
    }
    accepted
}

/// Disjoint cuts over an immutable original, ascending by start
struct CutPlan<'a> {
    text: &'a str,
    cuts: Vec<Range<usize>>,
}

impl<'a> CutPlan<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            cuts: Vec::new(),
        }
    }

    /// Plan the cuts for `accepted`, right to left
    fn build(text: &'a str, statements: &[DebugStatement], accepted: &[usize]) -> Self {
        let mut plan = Self::new(text);
        for &idx in accepted.iter().rev() {
            let cut = plan.cut_for(&statements[idx]);
            plan.add(cut);
        }
        plan
    }

    /// Record a cut, merging it with every cut it touches
    fn add(&mut self, cut: Range<usize>) {
        let mut merged = cut;
        self.cuts.retain(|existing| {
            let touches = existing.start <= merged.end && merged.start <= existing.end;
            if touches {
                merged.start = merged.start.min(existing.start);
                merged.end = merged.end.max(existing.end);
            }
            !touches
        });

        let at = self
            .cuts
            .partition_point(|existing| existing.start < merged.start);
        self.cuts.insert(at, merged);
    }

    fn cut_containing(&self, pos: usize) -> Option<&Range<usize>> {
        let idx = self.cuts.partition_point(|cut| cut.end <= pos);
        self.cuts.get(idx).filter(|cut| cut.start <= pos)
    }

    /// First visible position at or after `pos` whose char fails `keep_going`
    fn scan_forward(&self, mut pos: usize, keep_going: impl Fn(char) -> bool) -> usize {
        while pos < self.text.len() {
            if let Some(cut) = self.cut_containing(pos) {
                pos = cut.end;
                continue;
            }
            match self.text[pos..].chars().next() {
                Some(c) if keep_going(c) => pos += c.len_utf8(),
                _ => break,
            }
        }
        pos
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// Text of `range` with cuts left out
    fn visible(&self, range: Range<usize>) -> String {
        let mut out = String::new();
        let mut pos = range.start;

        for cut in &self.cuts {
            if cut.end <= pos {
                continue;
            }
            if cut.start >= range.end {
                break;
            }
            if cut.start > pos {
                out.push_str(&self.text[pos..cut.start]);
            }
            pos = cut.end;
        }

        if pos < range.end {
            out.push_str(&self.text[pos..range.end]);
        }
        out
    }

    fn cut_for(&self, statement: &DebugStatement) -> Range<usize> {
        let text = self.text;
        let start = statement.start_offset;
        let end = statement.end_offset;

        let line_start = lines::line_start(text, start);
        let line_end = self.scan_forward(end, |c| c != '\n');
        let before = &text[line_start..start];
        let after = self.visible(end..line_end);

        let before_code = before.trim_end_matches(is_horizontal_space);
        let dangling_comma_start = before_code
            .strip_suffix(',')
            .map(|rest| line_start + rest.trim_end_matches(is_horizontal_space).len());

        match LineContext::classify(before, &after) {
            LineContext::Alone => self.whole_line(line_start, line_end),
            LineContext::Leads => {
                let mut cut_end = self.scan_forward(end, is_horizontal_space);
                if self.char_at(cut_end) == Some(',') {
                    cut_end = self.scan_forward(cut_end + 1, is_horizontal_space);
                }

                if is_blank(&self.visible(cut_end..line_end)) {
                    self.whole_line(line_start, line_end)
                } else {
                    start..cut_end
                }
            }
            LineContext::Trails => {
                let cut_start = dangling_comma_start.unwrap_or(line_start + before_code.len());
                cut_start..self.scan_forward(end, is_horizontal_space)
            }
            LineContext::MidLine => {
                let next = self.scan_forward(end, is_horizontal_space);
                match (self.char_at(next), dangling_comma_start) {
                    (Some(','), _) => start..self.scan_forward(next + 1, is_horizontal_space),
                    (Some(')' | ']' | '}'), Some(comma)) => comma..next,
                    _ if before.len() > before_code.len() => start..next,
                    _ => start..end,
                }
            }
        }
    }

    /// Line span through its terminator, plus a blank line directly above
    fn whole_line(&self, line_start: usize, line_end: usize) -> Range<usize> {
        let text = self.text;
        let end = if line_end < text.len() {
            line_end + 1
        } else {
            line_end
        };

        let mut start = line_start;
        if line_start > 0 {
            let prev_start = lines::line_start(text, line_start - 1);
            if is_blank(&text[prev_start..line_start - 1]) {
                start = prev_start;
            }
        }

        start..end
    }

    fn assemble(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut pos = 0;
        for cut in &self.cuts {
            out.push_str(&self.text[pos..cut.start]);
            pos = cut.end;
        }
        out.push_str(&self.text[pos..]);
        out
    }
}
