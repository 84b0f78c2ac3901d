use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::registry::{
    BlockHandler, ChildLayout, Delimiter, HandlerContext, Outcome, RenderInput,
};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// `::: columns` opens a column list, `::: column [ratio]` a column; `:::` closes either.
pub struct Column;

impl Column {
    pub const DELIMITER: &'static str = ":::";
    pub const COLUMN: &'static str = "column";
    pub const COLUMNS: &'static str = "columns";

    fn column_pattern() -> &'static Regex {
        static COLUMN_REGEX: OnceLock<Regex> = OnceLock::new();
        COLUMN_REGEX.get_or_init(|| {
            Regex::new(r"(?i)^:::\s*column(?:\s+(\S+))?\s*$").expect("Invalid column regex")
        })
    }

    fn column_list_pattern() -> &'static Regex {
        static COLUMN_LIST_REGEX: OnceLock<Regex> = OnceLock::new();
        COLUMN_LIST_REGEX.get_or_init(|| {
            Regex::new(r"(?i)^:::\s*columns\s*$").expect("Invalid column list regex")
        })
    }

    /// Width ratio in `(0, 1]`. Anything else is dropped with a warning.
    pub fn parse_ratio(raw: &str) -> Option<f64> {
        match raw.parse::<f64>() {
            Ok(ratio) if ratio > 0.0 && ratio <= 1.0 => Some(ratio),
            _ => {
                log::warn!("Ignoring column width ratio '{raw}', expected a number in (0, 1]");
                None
            }
        }
    }
}

pub const COLUMN_HANDLER: BlockHandler = BlockHandler {
    name: "column",
    layout: ChildLayout::Delimited,
    can_parse: |cursor| Column::column_pattern().is_match(cursor.current().trim()),
    parse: parse_column,
    can_render: |block| matches!(block.kind, BlockKind::Column { .. }),
    render: render_column,
};

fn parse_column(cursor: &LineCursor<'_>, _ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let caps = Column::column_pattern().captures(cursor.current().trim())?;
    let width_ratio = caps.get(1).and_then(|m| Column::parse_ratio(m.as_str()));
    Some(Outcome::Open {
        block: Block::new(BlockKind::Column { width_ratio }),
        delimiter: Delimiter::Column,
    })
}

fn render_column(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Column { width_ratio } = &block.kind else {
        return String::new();
    };
    let opener = match width_ratio {
        Some(ratio) => format!("{}{} {} {ratio}", input.pad(), Column::DELIMITER, Column::COLUMN),
        None => format!("{}{} {}", input.pad(), Column::DELIMITER, Column::COLUMN),
    };
    input.delimited(opener, Delimiter::Column)
}

pub const COLUMN_LIST_HANDLER: BlockHandler = BlockHandler {
    name: "column_list",
    layout: ChildLayout::Delimited,
    can_parse: |cursor| Column::column_list_pattern().is_match(cursor.current().trim()),
    parse: |_, _| {
        Some(Outcome::Open {
            block: Block::new(BlockKind::ColumnList),
            delimiter: Delimiter::Column,
        })
    },
    can_render: |block| matches!(block.kind, BlockKind::ColumnList),
    render: |_, input| {
        let opener = format!("{}{} {}", input.pad(), Column::DELIMITER, Column::COLUMNS);
        input.delimited(opener, Delimiter::Column)
    },
};
