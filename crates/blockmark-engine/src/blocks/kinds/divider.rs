use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

pub struct Divider;

impl Divider {
    pub const MARKER: &'static str = "---";

    fn pattern() -> &'static Regex {
        static DIVIDER_REGEX: OnceLock<Regex> = OnceLock::new();
        DIVIDER_REGEX.get_or_init(|| Regex::new(r"^-{3,}$").expect("Invalid divider regex"))
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "divider",
    layout: ChildLayout::None,
    can_parse,
    parse,
    can_render,
    render,
};

fn can_parse(cursor: &LineCursor<'_>) -> bool {
    Divider::pattern().is_match(cursor.current().trim())
}

fn parse(_cursor: &LineCursor<'_>, _ctx: &HandlerContext<'_>) -> Option<Outcome> {
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::Divider),
        consumed: 0,
    })
}

fn can_render(block: &Block) -> bool {
    matches!(block.kind, BlockKind::Divider)
}

fn render(_block: &Block, input: &RenderInput<'_>) -> String {
    input.with_children(format!("{}{}", input.pad(), Divider::MARKER))
}
