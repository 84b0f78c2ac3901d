use std::iter::repeat_n;

/// Backslash escape: `\` followed by ASCII punctuation yields that character literally.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';

    /// Characters escaped wherever they appear in serialized text.
    pub const ALWAYS: &'static [char] = &['\\', '*', '_', '~', '`', '$', '[', ']'];

    /// Leading blanks are escaped so the line keeps them.
    pub fn escapes(next: u8) -> bool {
        next.is_ascii_punctuation() || next == b' ' || next == b'\t'
    }

    /// Encodes the body of a raw zone.
    ///
    /// Newlines become `<br>`. A run of backslashes in front of a `<br>` or of a
    /// `guarded` character is doubled, and a literal `<br>` or guarded character
    /// gets one more. With `guard_end` a trailing run is doubled as well. Other
    /// backslashes are written as they are.
    pub fn encode_raw(content: &str, guarded: &[char], guard_end: bool) -> String {
        let backslash = Self::BACKSLASH as char;
        let mut out = String::with_capacity(content.len());
        let mut pending = 0;
        for (i, c) in content.char_indices() {
            if c == backslash {
                pending += 1;
                continue;
            }
            let marked =
                c == '\n' || guarded.contains(&c) || content[i..].starts_with(LineBreak::TAG);
            let count = if marked {
                pending * 2 + usize::from(c != '\n')
            } else {
                pending
            };
            out.extend(repeat_n(backslash, count));
            pending = 0;
            if c == '\n' {
                out.push_str(LineBreak::TAG);
            } else {
                out.push(c);
            }
        }
        out.extend(repeat_n(backslash, if guard_end { pending * 2 } else { pending }));
        out
    }

    /// Reverses [`Escape::encode_raw`].
    pub fn decode_raw(body: &str, guarded: &[char], guard_end: bool) -> String {
        let backslash = Self::BACKSLASH as char;
        let mut out = String::with_capacity(body.len());
        let mut pending = 0;
        let mut i = 0;
        while let Some(c) = body[i..].chars().next() {
            if c == backslash {
                pending += 1;
                i += 1;
                continue;
            }
            if body[i..].starts_with(LineBreak::TAG) {
                out.extend(repeat_n(backslash, pending / 2));
                if pending % 2 == 1 {
                    out.push_str(LineBreak::TAG);
                } else {
                    out.push('\n');
                }
                i += LineBreak::TAG.len();
            } else {
                let kept = if guarded.contains(&c) { pending / 2 } else { pending };
                out.extend(repeat_n(backslash, kept));
                out.push(c);
                i += c.len_utf8();
            }
            pending = 0;
        }
        out.extend(repeat_n(backslash, if guard_end { pending / 2 } else { pending }));
        out
    }
}

/// Hard line break inside a single line of markup.
pub struct LineBreak;

impl LineBreak {
    pub const TAG: &'static str = "<br>";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blanks_and_punctuation_are_escapable() {
        assert!(Escape::escapes(b'*'));
        assert!(Escape::escapes(b' '));
        assert!(!Escape::escapes(b'a'));
    }

    #[test]
    fn raw_zone_tells_newlines_from_literal_tags() {
        let encoded = Escape::encode_raw("a\nb<br>c", &[], false);
        assert_eq!(encoded, r"a<br>b\<br>c");
        assert_eq!(Escape::decode_raw(&encoded, &[], false), "a\nb<br>c");
    }

    #[test]
    fn legacy_tag_without_backslash_is_a_newline() {
        assert_eq!(Escape::decode_raw("x<br>y", &[], false), "x\ny");
    }
}
