use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind, RichTextRun};
use crate::parsing::cursor::LineCursor;
use crate::rich_text::kinds::{Escape, raw_zone_end};

/// Pipe tables: `| a | b |` rows, optionally followed by a `|---|---|` header separator.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';
    pub const SEPARATOR_CELL: &'static str = "---";

    fn separator_pattern() -> &'static Regex {
        static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
        SEPARATOR_REGEX.get_or_init(|| {
            Regex::new(r"^\|[\s\-:|]*-[\s\-:|]*\|$").expect("Invalid table separator regex")
        })
    }

    pub fn is_row(line: &str) -> bool {
        let t = line.trim();
        t.len() >= 2 && t.starts_with(Self::PIPE) && t.ends_with(Self::PIPE) && !t.ends_with("\\|")
    }

    pub fn is_separator(line: &str) -> bool {
        Self::separator_pattern().is_match(line.trim())
    }

    /// Cell markup between unescaped pipes. Code spans and inline equations are opaque.
    pub fn split_cells(line: &str) -> Vec<&str> {
        let t = line.trim();
        let inner = t
            .strip_prefix(Self::PIPE)
            .and_then(|r| r.strip_suffix(Self::PIPE))
            .unwrap_or(t);
        let bytes = inner.as_bytes();
        let mut cells = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            if let Some(end) = raw_zone_end(bytes, i) {
                i = end;
                continue;
            }
            match bytes[i] {
                Escape::BACKSLASH => i += 1,
                b if b == Self::PIPE as u8 => {
                    cells.push(inner[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        cells.push(inner[start..].trim());
        cells
    }

    /// Escapes pipes outside raw zones, and a cell that would read as a separator.
    pub fn escape_cell(markup: &str) -> String {
        let mut out = String::with_capacity(markup.len());
        if !markup.is_empty() && markup.chars().all(|c| matches!(c, '-' | ':' | ' ')) {
            out.push(Escape::BACKSLASH as char);
        }
        let bytes = markup.as_bytes();
        let mut copied = 0;
        let mut i = 0;
        while i < bytes.len() {
            if let Some(end) = raw_zone_end(bytes, i) {
                i = end;
                continue;
            }
            match bytes[i] {
                Escape::BACKSLASH => i += 1,
                b if b == Self::PIPE as u8 => {
                    out.push_str(&markup[copied..i]);
                    out.push(Escape::BACKSLASH as char);
                    copied = i;
                }
                _ => {}
            }
            i += 1;
        }
        out.push_str(&markup[copied..]);
        out
    }

    fn row_line(pad: &str, cells: &[Vec<RichTextRun>], input: &RenderInput<'_>) -> String {
        let rendered: Vec<String> = cells
            .iter()
            .map(|cell| Self::escape_cell(&input.codec.to_markup(cell)))
            .collect();
        if rendered.is_empty() {
            return format!("{pad}{}{}", Self::PIPE, Self::PIPE);
        }
        format!("{pad}{} {} {}", Self::PIPE, rendered.join(" | "), Self::PIPE)
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "table",
    layout: ChildLayout::None,
    can_parse: |cursor| Table::is_row(cursor.current()),
    parse,
    can_render: |block| matches!(block.kind, BlockKind::Table { .. }),
    render,
};

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let extra = cursor
        .following()
        .iter()
        .take_while(|l| Table::is_row(l))
        .count();
    let lines = std::iter::once(cursor.current())
        .chain(cursor.following()[..extra].iter().map(String::as_str));

    let mut has_column_header = false;
    let mut rows: Vec<Vec<Vec<RichTextRun>>> = Vec::new();
    for (i, line) in lines.enumerate() {
        if Table::is_separator(line) {
            has_column_header |= i == 1;
            continue;
        }
        rows.push(
            Table::split_cells(line)
                .into_iter()
                .map(|cell| ctx.codec.to_spans(cell))
                .collect(),
        );
    }

    let table_width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let children = rows
        .into_iter()
        .map(|mut cells| {
            cells.resize_with(table_width, Vec::new);
            Block::new(BlockKind::TableRow { cells })
        })
        .collect();

    Some(Outcome::Leaf {
        block: Block::with_children(
            BlockKind::Table {
                table_width,
                has_column_header,
                has_row_header: false,
            },
            children,
        ),
        consumed: extra,
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Table {
        table_width,
        has_column_header,
        ..
    } = &block.kind
    else {
        return String::new();
    };
    let pad = input.pad();
    let mut lines = Vec::with_capacity(block.children.len() + 1);
    for (i, row) in block.children.iter().enumerate() {
        if let BlockKind::TableRow { cells } = &row.kind {
            lines.push(Table::row_line(&pad, cells, input));
        }
        if i == 0 && *has_column_header {
            let cells = vec![Table::SEPARATOR_CELL; *table_width];
            lines.push(format!(
                "{pad}{}{}{}",
                Table::PIPE,
                cells.join(&Table::PIPE.to_string()),
                Table::PIPE
            ));
        }
    }
    lines.join("\n")
}

/// Rows are rendered by their table; a lone row renders as a single line.
pub const ROW_HANDLER: BlockHandler = BlockHandler {
    name: "table_row",
    layout: ChildLayout::None,
    can_parse: |_| false,
    parse: |_, _| None,
    can_render: |block| matches!(block.kind, BlockKind::TableRow { .. }),
    render: |block, input| match &block.kind {
        BlockKind::TableRow { cells } => Table::row_line(&input.pad(), cells, input),
        _ => String::new(),
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn row_and_separator_detection() {
        assert!(Table::is_row("| a | b |"));
        assert!(!Table::is_row("| a | b"));
        assert!(!Table::is_row(r"| a \|"));
        assert!(Table::is_separator("|---|:---:|"));
        assert!(Table::is_separator("| --- | --- |"));
        assert!(!Table::is_separator("| a |"));
        assert!(!Table::is_separator("| |"));
    }

    #[test]
    fn split_respects_escapes_and_raw_zones() {
        assert_eq!(Table::split_cells(r"| a \| b | `x|y` | $|v|$ |"), vec![
            r"a \| b",
            "`x|y`",
            "$|v|$"
        ]);
        assert_eq!(Table::split_cells("| a |  |"), vec!["a", ""]);
    }

    #[test]
    fn long_fences_and_escaped_dollars_stay_in_one_cell() {
        assert_eq!(Table::split_cells(r"| ``a`|b`` | $x\$|$ |"), vec![
            "``a`|b``",
            r"$x\$|$"
        ]);
        assert_eq!(Table::escape_cell(r"``a`|b`` c|d"), r"``a`|b`` c\|d");
    }

    #[test]
    fn escape_cell_leaves_raw_zones() {
        assert_eq!(Table::escape_cell("a|b `c|d`"), r"a\|b `c|d`");
        assert_eq!(Table::escape_cell("---"), r"\---");
        assert_eq!(Table::escape_cell(r"\$ | x"), r"\$ \| x");
    }
}
