/// Tidy text after removals.
///
/// - runs of blank or whitespace-only lines longer than `max_empty_lines`
///   shrink to exactly `max_empty_lines` empty lines
/// - trailing whitespace is stripped from every line
/// - the text ends with exactly one line terminator (empty text stays empty)
///
/// `\r\n` is kept as the terminator when the text already uses it.
pub fn normalize(text: &str, max_empty_lines: usize) -> String {
    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };

    let mut kept: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > max_empty_lines {
                continue;
            }
        } else {
            blank_run = 0;
        }
        kept.push(line);
    }

    while kept.last().is_some_and(|line| line.is_empty()) {
        kept.pop();
    }

    if kept.is_empty() {
        return String::new();
    }

    let mut out = kept.join(eol);
    out.push_str(eol);
    out
}
