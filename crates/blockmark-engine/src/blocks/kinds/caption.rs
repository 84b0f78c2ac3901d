use std::sync::OnceLock;

use regex::Regex;

use crate::model::RichTextRun;
use crate::rich_text::RichTextCodec;

/// The `[caption] text` line that may follow a media or code block.
pub struct Caption;

impl Caption {
    pub const MARKER: &'static str = "[caption]";

    fn pattern() -> &'static Regex {
        static CAPTION_REGEX: OnceLock<Regex> = OnceLock::new();
        CAPTION_REGEX
            .get_or_init(|| Regex::new(r"^\[caption\]\s+(\S.*)$").expect("Invalid caption regex"))
    }

    /// Caption markup if `line` is a caption line.
    pub fn parse(line: &str) -> Option<&str> {
        Self::pattern()
            .captures(line.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// The caption line at `pad`, or `None` for an empty caption.
    pub fn render(pad: &str, codec: &RichTextCodec, caption: &[RichTextRun]) -> Option<String> {
        let markup = codec.to_markup(caption);
        (!markup.trim().is_empty()).then(|| format!("{pad}{} {markup}", Self::MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_caption_lines() {
        assert_eq!(Caption::parse("  [caption] A photo"), Some("A photo"));
        assert_eq!(Caption::parse("[caption]"), None);
        assert_eq!(Caption::parse("caption text"), None);
    }

    #[test]
    fn renders_at_indent() {
        let codec = RichTextCodec::default();
        assert_eq!(
            Caption::render("  ", &codec, &[RichTextRun::plain("x")]),
            Some("  [caption] x".to_string())
        );
        assert_eq!(Caption::render("", &codec, &[]), None);
    }
}
