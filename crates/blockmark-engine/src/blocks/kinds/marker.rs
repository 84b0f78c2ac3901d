//! Single-token lines: `[breadcrumb]`, `[toc]` and the `[space]` spacer.

use crate::blocks::registry::{BlockHandler, ChildLayout, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

pub struct Marker;

impl Marker {
    pub const BREADCRUMB: &'static str = "[breadcrumb]";
    pub const TABLE_OF_CONTENTS: &'static str = "[toc]";
    pub const SPACE: &'static str = "[space]";

    fn is(cursor: &LineCursor<'_>, token: &str) -> bool {
        cursor.current().trim().eq_ignore_ascii_case(token)
    }

    fn line(input: &RenderInput<'_>, token: &str) -> String {
        input.with_children(format!("{}{token}", input.pad()))
    }
}

pub const BREADCRUMB_HANDLER: BlockHandler = BlockHandler {
    name: "breadcrumb",
    layout: ChildLayout::None,
    can_parse: |cursor| Marker::is(cursor, Marker::BREADCRUMB),
    parse: |_, _| {
        Some(Outcome::Leaf {
            block: Block::new(BlockKind::Breadcrumb),
            consumed: 0,
        })
    },
    can_render: |block| matches!(block.kind, BlockKind::Breadcrumb),
    render: |_, input| Marker::line(input, Marker::BREADCRUMB),
};

pub const TABLE_OF_CONTENTS_HANDLER: BlockHandler = BlockHandler {
    name: "table_of_contents",
    layout: ChildLayout::None,
    can_parse: |cursor| Marker::is(cursor, Marker::TABLE_OF_CONTENTS),
    parse: |_, _| {
        Some(Outcome::Leaf {
            block: Block::new(BlockKind::TableOfContents),
            consumed: 0,
        })
    },
    can_render: |block| matches!(block.kind, BlockKind::TableOfContents),
    render: |_, input| Marker::line(input, Marker::TABLE_OF_CONTENTS),
};

/// An empty paragraph. Registered ahead of the paragraph handler so that it
/// also renders every text-less paragraph.
pub const SPACE_HANDLER: BlockHandler = BlockHandler {
    name: "space",
    layout: ChildLayout::Indented,
    can_parse: |cursor| Marker::is(cursor, Marker::SPACE),
    parse: |_, _| {
        Some(Outcome::Leaf {
            block: Block::spacer(),
            consumed: 0,
        })
    },
    can_render: |block| {
        matches!(&block.kind, BlockKind::Paragraph { rich_text } if rich_text.is_empty())
    },
    render: |_, input| Marker::line(input, Marker::SPACE),
};
