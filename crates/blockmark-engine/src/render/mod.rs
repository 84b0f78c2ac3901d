//! # Tree Renderer
//!
//! Writes a block tree back to markup. Children are rendered first at
//! `indent + 1`, then handed to the block's handler as a finished string.
//! Top-level blocks are separated by a blank line, nested siblings by a
//! single newline. Adjacent nested tables keep a blank line between them.
//!
//! ## Modules
//!
//! - **`numbering`**: Renumbers consecutive numbered list items per sibling level

pub mod numbering;

use crate::blocks::registry::{Registry, RenderInput};
use crate::model::{Block, BlockKind};
use crate::options::ConverterOptions;
use crate::rich_text::RichTextCodec;

/// Separator between top-level blocks.
pub const TOP_LEVEL_SEPARATOR: &str = "\n\n";
/// Separator between nested siblings.
pub const NESTED_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    registry: Registry,
    codec: &'a RichTextCodec,
    options: &'a ConverterOptions,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(codec: &'a RichTextCodec, options: &'a ConverterOptions) -> Self {
        Self {
            registry: Registry::default(),
            codec,
            options,
        }
    }

    /// Renders a whole forest.
    ///
    /// # Panics
    ///
    /// If a block violates a container invariant, such as a table holding a
    /// non-row child or no rows at all. The parser never builds such a tree.
    pub fn render(&self, blocks: &[Block]) -> String {
        for block in blocks {
            if let Err(e) = block.validate() {
                panic!("cannot render malformed block tree: {e}");
            }
        }
        self.render_level(blocks, 0).join(TOP_LEVEL_SEPARATOR)
    }

    fn render_level(&self, blocks: &[Block], indent: usize) -> Vec<String> {
        let mut parts: Vec<String> = blocks
            .iter()
            .map(|block| self.render_block(block, indent))
            .collect();
        numbering::renumber(blocks, &mut parts, &self.options.indent(indent));
        parts
    }

    fn render_block(&self, block: &Block, indent: usize) -> String {
        let children = join_nested(&block.children, self.render_level(&block.children, indent + 1));
        match self.registry.renderer_for(block) {
            Some(handler) => (handler.render)(block, &RenderInput {
                codec: self.codec,
                options: self.options,
                indent,
                children: &children,
            }),
            None => {
                log::warn!("No renderer for {} block, keeping its children", block.kind.name());
                children
            }
        }
    }
}

/// Joins rendered siblings. Two tables in a row would read back as one, so
/// they get a blank line.
fn join_nested(blocks: &[Block], parts: Vec<String>) -> String {
    let is_table = |i: usize| matches!(blocks[i].kind, BlockKind::Table { .. });
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(if is_table(i - 1) && is_table(i) {
                TOP_LEVEL_SEPARATOR
            } else {
                NESTED_SEPARATOR
            });
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RichTextRun;
    use pretty_assertions::assert_eq;

    fn render(blocks: &[Block]) -> String {
        let codec = RichTextCodec::default();
        let options = ConverterOptions::default();
        TreeRenderer::new(&codec, &options).render(blocks)
    }

    fn bullet(text: &str, children: Vec<Block>) -> Block {
        Block::with_children(
            BlockKind::BulletedListItem {
                rich_text: vec![RichTextRun::plain(text)],
            },
            children,
        )
    }

    #[test]
    fn nested_children_are_indented() {
        let tree = vec![
            bullet("a", vec![bullet("b", vec![bullet("c", vec![])])]),
            Block::paragraph(vec![RichTextRun::plain("end")]),
        ];
        assert_eq!(render(&tree), "- a\n  - b\n    - c\n\nend");
    }

    #[test]
    fn delimited_container_gets_closer() {
        let tree = vec![Block::with_children(
            BlockKind::Toggle {
                rich_text: vec![RichTextRun::plain("More")],
            },
            vec![Block::paragraph(vec![RichTextRun::plain("hidden")])],
        )];
        assert_eq!(render(&tree), "+++ More\n  hidden\n+++");
    }

    #[test]
    #[should_panic(expected = "malformed block tree")]
    fn malformed_table_panics() {
        let table = Block::with_children(
            BlockKind::Table {
                table_width: 1,
                has_column_header: false,
                has_row_header: false,
            },
            vec![Block::new(BlockKind::Divider)],
        );
        render(&[table]);
    }

    #[test]
    #[should_panic(expected = "malformed block tree")]
    fn table_without_rows_panics() {
        let table = Block::new(BlockKind::Table {
            table_width: 1,
            has_column_header: false,
            has_row_header: false,
        });
        render(&[table]);
    }

    fn one_cell_table(text: &str) -> Block {
        Block::with_children(
            BlockKind::Table {
                table_width: 1,
                has_column_header: false,
                has_row_header: false,
            },
            vec![Block::new(BlockKind::TableRow {
                cells: vec![vec![RichTextRun::plain(text)]],
            })],
        )
    }

    #[test]
    fn nested_tables_are_kept_apart() {
        let tree = vec![bullet(
            "a",
            vec![one_cell_table("x"), one_cell_table("y"), bullet("b", vec![])],
        )];
        assert_eq!(render(&tree), "- a\n  | x |\n\n  | y |\n  - b");
    }
}
