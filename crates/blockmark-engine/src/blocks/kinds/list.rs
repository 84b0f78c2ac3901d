use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// List item markers: `- text`, `- [x] text` and `1. text`.
pub struct ListItem;

impl ListItem {
    pub const BULLET: &'static str = "-";
    pub const UNCHECKED: &'static str = "[ ]";
    pub const CHECKED: &'static str = "[x]";
    /// Placeholder numeral; the renderer renumbers consecutive items.
    pub const NUMBER: &'static str = "1.";

    fn todo_pattern() -> &'static Regex {
        static TODO_REGEX: OnceLock<Regex> = OnceLock::new();
        TODO_REGEX.get_or_init(|| {
            Regex::new(r"^[-*]\s+\[([ xX])\](?:\s+(.*))?$").expect("Invalid todo regex")
        })
    }

    fn bullet_pattern() -> &'static Regex {
        static BULLET_REGEX: OnceLock<Regex> = OnceLock::new();
        BULLET_REGEX
            .get_or_init(|| Regex::new(r"^[-*](?:\s+(.*))?$").expect("Invalid bullet regex"))
    }

    fn numbered_pattern() -> &'static Regex {
        static NUMBERED_REGEX: OnceLock<Regex> = OnceLock::new();
        NUMBERED_REGEX.get_or_init(|| {
            Regex::new(r"^(\d+)\.(?:\s+(.*))?$").expect("Invalid numbered list regex")
        })
    }
}

/// Marker and text joined, without a trailing space for empty text.
fn item_line(pad: &str, marker: &str, markup: &str) -> String {
    if markup.is_empty() {
        format!("{pad}{marker}")
    } else {
        format!("{pad}{marker} {markup}")
    }
}

pub const TODO_HANDLER: BlockHandler = BlockHandler {
    name: "to_do",
    layout: ChildLayout::Indented,
    can_parse: |cursor| ListItem::todo_pattern().is_match(cursor.current().trim()),
    parse: parse_todo,
    can_render: |block| matches!(block.kind, BlockKind::ToDo { .. }),
    render: render_todo,
};

fn parse_todo(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let caps = ListItem::todo_pattern().captures(cursor.current().trim())?;
    let checked = !caps[1].trim().is_empty();
    let text = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::ToDo {
            rich_text: ctx.codec.to_spans(text),
            checked,
        }),
        consumed: 0,
    })
}

fn render_todo(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::ToDo { rich_text, checked } = &block.kind else {
        return String::new();
    };
    let checkbox = if *checked {
        ListItem::CHECKED
    } else {
        ListItem::UNCHECKED
    };
    let marker = format!("{} {checkbox}", ListItem::BULLET);
    let own = item_line(&input.pad(), &marker, &input.codec.to_markup(rich_text));
    input.with_children(own)
}

pub const BULLETED_HANDLER: BlockHandler = BlockHandler {
    name: "bulleted_list_item",
    layout: ChildLayout::Indented,
    can_parse: |cursor| ListItem::bullet_pattern().is_match(cursor.current().trim()),
    parse: parse_bulleted,
    can_render: |block| matches!(block.kind, BlockKind::BulletedListItem { .. }),
    render: render_bulleted,
};

fn parse_bulleted(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let caps = ListItem::bullet_pattern().captures(cursor.current().trim())?;
    let text = caps.get(1).map_or("", |m| m.as_str().trim());
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::BulletedListItem {
            rich_text: ctx.codec.to_spans(text),
        }),
        consumed: 0,
    })
}

fn render_bulleted(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::BulletedListItem { rich_text } = &block.kind else {
        return String::new();
    };
    let own = item_line(
        &input.pad(),
        ListItem::BULLET,
        &input.codec.to_markup(rich_text),
    );
    input.with_children(own)
}

pub const NUMBERED_HANDLER: BlockHandler = BlockHandler {
    name: "numbered_list_item",
    layout: ChildLayout::Indented,
    can_parse: |cursor| ListItem::numbered_pattern().is_match(cursor.current().trim()),
    parse: parse_numbered,
    can_render: |block| matches!(block.kind, BlockKind::NumberedListItem { .. }),
    render: render_numbered,
};

fn parse_numbered(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let caps = ListItem::numbered_pattern().captures(cursor.current().trim())?;
    let text = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::NumberedListItem {
            rich_text: ctx.codec.to_spans(text),
            number: None,
        }),
        consumed: 0,
    })
}

fn render_numbered(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::NumberedListItem { rich_text, .. } = &block.kind else {
        return String::new();
    };
    let own = item_line(
        &input.pad(),
        ListItem::NUMBER,
        &input.codec.to_markup(rich_text),
    );
    input.with_children(own)
}
