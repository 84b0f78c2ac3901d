use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// `#`, `##` or `###` followed by the heading text. A bare marker is an empty heading.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 3;

    fn pattern() -> &'static Regex {
        static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
        HEADING_REGEX.get_or_init(|| {
            Regex::new(r"^(#{1,3})(?:[ \t]+(.*))?$").expect("Invalid heading regex")
        })
    }

    pub fn marker(level: u8) -> String {
        Self::MARKER
            .to_string()
            .repeat(level.clamp(1, Self::MAX_LEVEL) as usize)
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "heading",
    layout: ChildLayout::None,
    can_parse,
    parse,
    can_render,
    render,
};

fn can_parse(cursor: &LineCursor<'_>) -> bool {
    Heading::pattern().is_match(cursor.current().trim())
}

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let caps = Heading::pattern().captures(cursor.current().trim())?;
    let level = caps[1].len() as u8;
    let text = caps.get(2).map_or("", |m| m.as_str().trim());
    let rich_text = ctx.codec.to_spans(text);
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::Heading { level, rich_text }),
        consumed: 0,
    })
}

fn can_render(block: &Block) -> bool {
    matches!(block.kind, BlockKind::Heading { .. })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Heading { level, rich_text } = &block.kind else {
        return String::new();
    };
    let markup = input.codec.to_markup(rich_text);
    let own = if markup.is_empty() {
        format!("{}{}", input.pad(), Heading::marker(*level))
    } else {
        format!("{}{} {markup}", input.pad(), Heading::marker(*level))
    };
    input.with_children(own)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", true)]
    #[case("### x", true)]
    #[case("#", true)]
    #[case("## ", true)]
    #[case("#Title", false)]
    #[case("#### x", false)]
    fn heading_lines(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(Heading::pattern().is_match(line.trim()), expected);
    }
}
