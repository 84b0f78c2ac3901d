/// Read-only view of the line sequence at a position.
///
/// Handlers inspect the current line and look ahead; they report how many
/// lines they consumed instead of moving the cursor themselves.
#[derive(Debug, Clone, Copy)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    index: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, index: 0 }
    }

    pub fn at(lines: &'a [String], index: usize) -> Self {
        Self { lines, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.index >= self.lines.len()
    }

    /// The current line, or `""` past the end.
    pub fn current(&self) -> &'a str {
        self.peek(0).unwrap_or_default()
    }

    /// The line `offset` positions after the current one.
    pub fn peek(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.index + offset).map(String::as_str)
    }

    /// Lines after the current one.
    pub fn following(&self) -> &'a [String] {
        self.lines.get(self.index + 1..).unwrap_or_default()
    }

    /// The current line and up to `n - 1` following lines.
    pub fn window(&self, n: usize) -> &'a [String] {
        let end = (self.index + n).min(self.lines.len());
        self.lines.get(self.index..end).unwrap_or_default()
    }

    pub fn advance(&mut self, n: usize) {
        self.index += n;
    }
}

/// Number of leading spaces.
pub fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cursor_peeks_and_advances() {
        let ls = lines(&["a", "b", "c"]);
        let mut cur = LineCursor::new(&ls);
        assert_eq!(cur.current(), "a");
        assert_eq!(cur.peek(2), Some("c"));
        assert_eq!(cur.following().len(), 2);
        assert_eq!(cur.window(2), &ls[..2]);
        assert_eq!(cur.window(9).len(), 3);
        cur.advance(3);
        assert!(cur.is_end());
        assert_eq!(cur.current(), "");
        assert!(cur.following().is_empty());
    }

    #[test]
    fn indent_counts_spaces_only() {
        assert_eq!(indent_of("    x"), 4);
        assert_eq!(indent_of("x"), 0);
        assert_eq!(indent_of(""), 0);
        assert!(is_blank("   "));
    }
}
