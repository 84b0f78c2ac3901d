use crate::blocks::registry::{
    BlockHandler, ChildLayout, Delimiter, HandlerContext, Outcome, RenderInput,
};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

use super::heading::Heading;

/// `+++ title` toggles and `+++# title` toggleable headings, both closed by a bare `+++`.
pub struct Toggle;

impl Toggle {
    pub const DELIMITER: &'static str = "+++";
    /// Written for a toggle without a title; a bare `+++` would close.
    pub const EMPTY_TITLE: &'static str = "\\";

    /// Title markup of a plain toggle line, `""` for [`Toggle::EMPTY_TITLE`].
    fn title(line: &str) -> Option<&str> {
        let rest = line.trim().strip_prefix(Self::DELIMITER)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        match rest.trim() {
            "" => None,
            Self::EMPTY_TITLE => Some(""),
            title => Some(title),
        }
    }

    /// `(level, title)` of a toggleable heading line. The title may be empty.
    fn heading(line: &str) -> Option<(u8, &str)> {
        let rest = line.trim().strip_prefix(Self::DELIMITER)?.trim_start();
        let hashes = rest.len() - rest.trim_start_matches(Heading::MARKER).len();
        if hashes == 0 || hashes > Heading::MAX_LEVEL as usize {
            return None;
        }
        Some((hashes as u8, rest[hashes..].trim()))
    }

    /// Title markup with a leading `#` escaped so it stays a plain toggle.
    fn escape_title(markup: String) -> String {
        if markup.trim().is_empty() {
            Self::EMPTY_TITLE.to_string()
        } else if markup.starts_with(Heading::MARKER) {
            format!("\\{markup}")
        } else {
            markup
        }
    }
}

pub const TOGGLEABLE_HEADING_HANDLER: BlockHandler = BlockHandler {
    name: "toggleable_heading",
    layout: ChildLayout::Delimited,
    can_parse: |cursor| Toggle::heading(cursor.current()).is_some(),
    parse: parse_toggleable_heading,
    can_render: |block| matches!(block.kind, BlockKind::ToggleableHeading { .. }),
    render: render_toggleable_heading,
};

fn parse_toggleable_heading(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let (level, title) = Toggle::heading(cursor.current())?;
    Some(Outcome::Open {
        block: Block::new(BlockKind::ToggleableHeading {
            level,
            rich_text: ctx.codec.to_spans(title),
        }),
        delimiter: Delimiter::Toggle,
    })
}

fn render_toggleable_heading(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::ToggleableHeading { level, rich_text } = &block.kind else {
        return String::new();
    };
    let markup = input.codec.to_markup(rich_text);
    let marker = Heading::marker(*level);
    let opener = if markup.is_empty() {
        format!("{}{}{marker}", input.pad(), Toggle::DELIMITER)
    } else {
        format!("{}{}{marker} {markup}", input.pad(), Toggle::DELIMITER)
    };
    input.delimited(opener, Delimiter::Toggle)
}

pub const TOGGLE_HANDLER: BlockHandler = BlockHandler {
    name: "toggle",
    layout: ChildLayout::Delimited,
    can_parse: |cursor| Toggle::title(cursor.current()).is_some(),
    parse: parse_toggle,
    can_render: |block| matches!(block.kind, BlockKind::Toggle { .. }),
    render: render_toggle,
};

fn parse_toggle(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let title = Toggle::title(cursor.current())?;
    Some(Outcome::Open {
        block: Block::new(BlockKind::Toggle {
            rich_text: ctx.codec.to_spans(title),
        }),
        delimiter: Delimiter::Toggle,
    })
}

fn render_toggle(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Toggle { rich_text } = &block.kind else {
        return String::new();
    };
    let title = Toggle::escape_title(input.codec.to_markup(rich_text));
    let opener = format!("{}{} {title}", input.pad(), Toggle::DELIMITER);
    input.delimited(opener, Delimiter::Toggle)
}
