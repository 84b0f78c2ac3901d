use crate::blocks::kinds::code_fence::CodeFence;

/// Splits markup into normalized lines.
///
/// Line endings become `\n`, leading tabs expand to `indent_width` spaces and
/// trailing whitespace is dropped. Lines inside code fences are kept verbatim
/// apart from the line ending. Trailing blank lines are removed.
pub fn normalize(markup: &str, indent_width: usize) -> Vec<String> {
    let text = markup.replace("\r\n", "\n").replace('\r', "\n");
    let mut fence: Option<usize> = None;
    let mut lines = Vec::new();

    for line in text.split('\n') {
        if let Some(len) = fence {
            if CodeFence::closes(line, len) {
                fence = None;
                lines.push(normalize_line(line, indent_width));
            } else {
                lines.push(line.to_string());
            }
            continue;
        }
        if let Some((len, _)) = CodeFence::opener(line) {
            fence = Some(len);
        }
        lines.push(normalize_line(line, indent_width));
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn normalize_line(line: &str, indent_width: usize) -> String {
    let body = line.trim_start_matches(['\t', ' ']);
    let lead = &line[..line.len() - body.len()];
    let width: usize = lead
        .chars()
        .map(|c| if c == '\t' { indent_width } else { 1 })
        .sum();
    format!("{}{}", " ".repeat(width), body.trim_end())
}
