use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// `> text`. A second `>` right after the first is not a quote.
pub struct Quote;

impl Quote {
    pub const MARKER: char = '>';

    fn text(line: &str) -> Option<&str> {
        let rest = line.trim().strip_prefix(Self::MARKER)?;
        if rest.starts_with(Self::MARKER) {
            return None;
        }
        Some(rest.trim())
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "quote",
    layout: ChildLayout::Indented,
    can_parse,
    parse,
    can_render,
    render,
};

fn can_parse(cursor: &LineCursor<'_>) -> bool {
    Quote::text(cursor.current()).is_some()
}

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let text = Quote::text(cursor.current())?;
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::Quote {
            rich_text: ctx.codec.to_spans(text),
        }),
        consumed: 0,
    })
}

fn can_render(block: &Block) -> bool {
    matches!(block.kind, BlockKind::Quote { .. })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Quote { rich_text } = &block.kind else {
        return String::new();
    };
    let markup = input.codec.to_markup(rich_text);
    let own = if markup.is_empty() {
        format!("{}{}", input.pad(), Quote::MARKER)
    } else {
        format!("{}{} {markup}", input.pad(), Quote::MARKER)
    };
    input.with_children(own)
}
