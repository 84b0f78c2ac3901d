use crate::model::Annotations;

use super::{CodeSpan, Escape};

/// Delimited emphasis. Variants are declared innermost-first: serialization wraps
/// in this order, and an emphasis may only nest kinds declared before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
    Strikethrough,
    Italic,
    Underline,
    Bold,
}

impl Emphasis {
    /// Opening markers in match priority; longer markers first.
    pub const OPENERS: [(&'static [u8], Emphasis); 5] = [
        (b"**", Emphasis::Bold),
        (b"__", Emphasis::Underline),
        (b"~~", Emphasis::Strikethrough),
        (b"*", Emphasis::Italic),
        (b"_", Emphasis::Italic),
    ];

    /// Wrapping order used by the serializer.
    pub const WRAP_ORDER: [Emphasis; 4] = [
        Emphasis::Strikethrough,
        Emphasis::Italic,
        Emphasis::Underline,
        Emphasis::Bold,
    ];

    /// Marker written by the serializer.
    pub fn marker(self) -> &'static str {
        match self {
            Emphasis::Strikethrough => "~~",
            Emphasis::Italic => "*",
            Emphasis::Underline => "__",
            Emphasis::Bold => "**",
        }
    }

    pub fn is_set(self, annotations: &Annotations) -> bool {
        match self {
            Emphasis::Strikethrough => annotations.strikethrough,
            Emphasis::Italic => annotations.italic,
            Emphasis::Underline => annotations.underline,
            Emphasis::Bold => annotations.bold,
        }
    }

    pub fn apply(self, annotations: &mut Annotations) {
        match self {
            Emphasis::Strikethrough => annotations.strikethrough = true,
            Emphasis::Italic => annotations.italic = true,
            Emphasis::Underline => annotations.underline = true,
            Emphasis::Bold => annotations.bold = true,
        }
    }

    /// Single `_` does not open or close inside a word, so `snake_case` stays text.
    const INTRAWORD: &'static [u8] = b"_";

    /// The opener at `at`, if any.
    pub fn opener_at(s: &[u8], at: usize) -> Option<(&'static [u8], Emphasis)> {
        let rest = s.get(at..)?;
        let after_word = at > 0 && s[at - 1].is_ascii_alphanumeric();
        Self::OPENERS
            .into_iter()
            .find(|(marker, _)| rest.starts_with(marker))
            .filter(|(marker, _)| !(after_word && *marker == Self::INTRAWORD))
    }

    fn closes_at(marker: &[u8], s: &[u8], j: usize) -> bool {
        if !s[j..].starts_with(marker) {
            return false;
        }
        marker != Self::INTRAWORD
            || !s
                .get(j + marker.len())
                .is_some_and(|b| b.is_ascii_alphanumeric())
    }

    /// Index of the closing `marker` for content starting at `from`.
    ///
    /// Escapes and code spans are skipped. Emphasis of an inner kind is skipped
    /// whole when it closes, so `**a *b***` closes bold after the italic.
    pub fn find_close(self, marker: &[u8], s: &[u8], from: usize) -> Option<usize> {
        let mut j = from;
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
            if j > from && Self::closes_at(marker, s, j) {
                return Some(j);
            }
            if let Some((inner_marker, inner)) = Self::opener_at(s, j)
                && inner < self
                && let Some(close) = inner.find_close(inner_marker, s, j + inner_marker.len())
            {
                j = close + inner_marker.len();
                continue;
            }
            j += 1;
        }
        None
    }
}
