use std::ops::Range;

/// Byte offsets of line starts, split on `\n`
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(idx, _)| idx + 1),
        );
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of `\n`-separated segments, counting a trailing empty one
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.starts.len()
    }

    /// 1-indexed line and 0-indexed byte column of `offset`
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let idx = match self.starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (idx + 1, offset - self.starts[idx])
    }

    /// Byte range of a 1-indexed line, excluding its `\n`
    #[must_use]
    pub fn line_span(&self, line: usize) -> Range<usize> {
        let idx = line.saturating_sub(1).min(self.starts.len() - 1);
        let start = self.starts[idx];
        let end = self
            .starts
            .get(idx + 1)
            .map_or(self.len, |next| next - 1);
        start..end
    }
}

/// Start of the line containing `offset`
pub(crate) fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |idx| idx + 1)
}

/// Position of the `\n` ending the line containing `offset`, or `text.len()`
pub(crate) fn line_end(text: &str, offset: usize) -> usize {
    text[offset..]
        .find('\n')
        .map_or(text.len(), |idx| offset + idx)
}

/// Move `end` past `\s*;` when a statement terminator follows it
pub(crate) fn extend_past_terminator(text: &str, end: usize) -> usize {
    let rest = &text[end..];
    let trimmed = rest.trim_start();
    if trimmed.starts_with(';') {
        end + (rest.len() - trimmed.len()) + 1
    } else {
        end
    }
}

pub(crate) fn is_blank(fragment: &str) -> bool {
    fragment.trim().is_empty()
}

/// Spaces and tabs; a `\r` belongs to the line terminator
pub(crate) const fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
}
