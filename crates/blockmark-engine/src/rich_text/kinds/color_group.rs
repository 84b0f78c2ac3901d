use crate::model::Color;

use super::link::matching;

/// Color groups: `(red:...)` for foreground and `==(red:...)==` for background.
pub struct ColorGroup;

impl ColorGroup {
    pub const OPEN: u8 = b'(';
    pub const CLOSE: u8 = b')';
    pub const SEPARATOR: u8 = b':';
    pub const HIGHLIGHT: &'static str = "==";

    /// Parses a `name:` color token after the `(` at `open`.
    ///
    /// Returns the color and the index where the group body starts.
    pub fn token_at(s: &[u8], open: usize) -> Option<(Color, usize)> {
        if s.get(open) != Some(&Self::OPEN) {
            return None;
        }
        let name_start = open + 1;
        let name_len = s[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic() || **b == b'_')
            .count();
        if name_len == 0 || s.get(name_start + name_len) != Some(&Self::SEPARATOR) {
            return None;
        }
        let name = std::str::from_utf8(&s[name_start..name_start + name_len]).ok()?;
        let color = Color::from_name(name)?;
        (!color.is_default()).then_some((color, name_start + name_len + 1))
    }

    /// Matches a foreground group at `open`: `(color, body_start, close)`.
    pub fn foreground(s: &[u8], open: usize) -> Option<(Color, usize, usize)> {
        let (color, body) = Self::token_at(s, open)?;
        let close = matching(s, open, Self::OPEN, Self::CLOSE)?;
        (close > body).then_some((color, body, close))
    }

    /// Matches a background group at `open` (pointing at `==`): `(color, body_start, end)`
    /// where `end` is just past the trailing `==`.
    pub fn background(s: &[u8], open: usize) -> Option<(Color, usize, usize, usize)> {
        if !s[open..].starts_with(Self::HIGHLIGHT.as_bytes()) {
            return None;
        }
        let paren = open + Self::HIGHLIGHT.len();
        let (color, body) = Self::token_at(s, paren)?;
        let close = matching(s, paren, Self::OPEN, Self::CLOSE)?;
        if close <= body || !s[close + 1..].starts_with(Self::HIGHLIGHT.as_bytes()) {
            return None;
        }
        Some((color.to_background(), body, close, close + 1 + Self::HIGHLIGHT.len()))
    }
}
