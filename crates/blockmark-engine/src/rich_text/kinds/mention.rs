use crate::model::MentionKind;

/// Mention tokens `@page[..]`, `@database[..]`, `@user[..]` and `@date[..]`.
pub struct MentionToken;

/// What a mention token refers to before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionTarget {
    Reference(MentionKind),
    Date,
}

impl MentionToken {
    pub const SIGIL: u8 = b'@';
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const DATE: &'static str = "date";
    /// Separator between the two ends of a date range.
    pub const RANGE: &'static str = "–";

    fn targets() -> impl Iterator<Item = (MentionTarget, &'static str)> {
        MentionKind::ALL
            .into_iter()
            .map(|k| (MentionTarget::Reference(k), k.as_str()))
            .chain(std::iter::once((MentionTarget::Date, Self::DATE)))
    }

    /// True when `rest`, the text after an `@`, starts with a kind name that is
    /// followed by `[` or nothing. Such an `@` is escaped in plain text.
    pub fn names_kind(rest: &[u8]) -> bool {
        Self::targets().any(|(_, name)| {
            rest.starts_with(name.as_bytes())
                && matches!(rest.get(name.len()), None | Some(&Self::OPEN))
        })
    }

    /// Matches `@kind[content]` at `at`: `(target, content_start, close)`.
    pub fn bounds(s: &[u8], at: usize) -> Option<(MentionTarget, usize, usize)> {
        if s.get(at) != Some(&Self::SIGIL) {
            return None;
        }
        let rest = &s[at + 1..];
        let (target, name_len) = Self::targets()
            .find(|(_, name)| {
                rest.starts_with(name.as_bytes()) && rest.get(name.len()) == Some(&Self::OPEN)
            })
            .map(|(t, name)| (t, name.len()))?;
        let content_start = at + 1 + name_len + 1;
        let close = s[content_start..]
            .iter()
            .position(|&b| b == Self::CLOSE || b == b'\n')
            .map(|p| content_start + p)?;
        (s[close] == Self::CLOSE && close > content_start).then_some((target, content_start, close))
    }
}
