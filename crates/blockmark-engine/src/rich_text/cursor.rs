/// A cursor for inline parsing over a single line of markup.
///
/// Delimiters are all ASCII, so lookahead works on bytes; `bump_char` always
/// advances over a whole UTF-8 character so slices stay on char boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.s.as_bytes()
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks at the byte after the current one.
    pub fn peek_next(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i + 1).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances over one character, returning it.
    pub fn bump_char(&mut self) -> Option<char> {
        let c = self.s.get(self.i..)?.chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances by `n` bytes. Callers only skip ASCII delimiters.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Moves to an absolute byte index.
    pub fn seek(&mut self, i: usize) {
        self.i = i;
    }

    /// Slice between two byte indices of the underlying string.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.s.get(start..end).unwrap_or_default()
    }
}
