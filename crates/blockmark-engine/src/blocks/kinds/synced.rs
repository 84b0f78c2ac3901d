use crate::blocks::registry::{
    BlockHandler, ChildLayout, Delimiter, HandlerContext, Outcome, RenderInput,
};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// `>>> Synced Block` opens an original synced block closed by `>>>`;
/// `>>> Synced from: <id>` is a single-line reference to one.
pub struct Synced;

impl Synced {
    pub const DELIMITER: &'static str = ">>>";
    pub const ORIGINAL: &'static str = "Synced Block";
    pub const REFERENCE: &'static str = "Synced from:";

    fn header(line: &str) -> Option<&str> {
        let rest = line.trim().strip_prefix(Self::DELIMITER)?.trim();
        (!rest.is_empty()).then_some(rest)
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "synced_block",
    layout: ChildLayout::Delimited,
    can_parse: |cursor| Synced::header(cursor.current()).is_some(),
    parse,
    can_render: |block| matches!(block.kind, BlockKind::SyncedBlock { .. }),
    render,
};

fn parse(cursor: &LineCursor<'_>, _ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let header = Synced::header(cursor.current())?;
    if let Some(id) = header.strip_prefix(Synced::REFERENCE) {
        let id = id.trim();
        if !id.is_empty() {
            return Some(Outcome::Leaf {
                block: Block::new(BlockKind::SyncedBlock {
                    synced_from: Some(id.to_string()),
                }),
                consumed: 0,
            });
        }
    }
    Some(Outcome::Open {
        block: Block::new(BlockKind::SyncedBlock { synced_from: None }),
        delimiter: Delimiter::Synced,
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::SyncedBlock { synced_from } = &block.kind else {
        return String::new();
    };
    match synced_from {
        Some(id) => input.with_children(format!(
            "{}{} {} {id}",
            input.pad(),
            Synced::DELIMITER,
            Synced::REFERENCE
        )),
        None => input.delimited(
            format!("{}{} {}", input.pad(), Synced::DELIMITER, Synced::ORIGINAL),
            Delimiter::Synced,
        ),
    }
}
