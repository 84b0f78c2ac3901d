use super::{CodeSpan, Escape};

/// Link `[text](url)`. Link text is parsed recursively. The URL is written
/// verbatim unless it holds a backslash, a tick or unbalanced parentheses.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';

    /// Locates `(text_close, url_close)` for a link opening at `open`.
    pub fn bounds(s: &[u8], open: usize) -> Option<(usize, usize)> {
        if s.get(open) != Some(&Self::OPEN) {
            return None;
        }
        let text_close = matching(s, open, Self::OPEN, Self::CLOSE)?;
        if text_close == open + 1 || s.get(text_close + 1) != Some(&Self::URL_OPEN) {
            return None;
        }
        let url_close = matching(s, text_close + 1, Self::URL_OPEN, Self::URL_CLOSE)?;
        (url_close > text_close + 2).then_some((text_close, url_close))
    }

    /// URL as written between the parentheses.
    pub fn escape_url(url: &str) -> String {
        let mut depth = 0i32;
        let balanced = url.bytes().all(|b| {
            match b {
                Self::URL_OPEN => depth += 1,
                Self::URL_CLOSE => depth -= 1,
                _ => {}
            }
            depth >= 0 && b != Escape::BACKSLASH && b != CodeSpan::TICK
        }) && depth == 0;
        if balanced {
            return url.to_string();
        }
        let mut out = String::with_capacity(url.len() + 4);
        for c in url.chars() {
            if matches!(c, '\\' | '(' | ')' | '`') {
                out.push(Escape::BACKSLASH as char);
            }
            out.push(c);
        }
        out
    }

    /// Reads a written URL back: `\` before punctuation drops.
    pub fn unescape_url(written: &str) -> String {
        let mut out = String::with_capacity(written.len());
        let mut chars = written.chars().peekable();
        while let Some(c) = chars.next() {
            if c == Escape::BACKSLASH as char
                && let Some(&next) = chars.peek()
                && next.is_ascii_punctuation()
            {
                out.push(next);
                chars.next();
                continue;
            }
            out.push(c);
        }
        out
    }
}

/// Index of the bracket closing the one at `open`, honouring nesting, escapes and code spans.
pub fn matching(s: &[u8], open: usize, open_b: u8, close_b: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open;
    while j < s.len() {
        let b = s[j];
        if b == Escape::BACKSLASH {
            j += 2;
            continue;
        }
        if b == CodeSpan::TICK {
            j = CodeSpan::skip(s, j);
            continue;
        }
        if b == open_b {
            depth += 1;
        } else if b == close_b {
            depth -= 1;
            if depth == 0 {
                return Some(j);
            }
        }
        j += 1;
    }
    None
}
