use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rich_text::{RichTextRun, merge_adjacent};

/// Payload shared by every media-like block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichTextRun>,
}

impl Media {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: Vec::new(),
        }
    }
}

/// The variant-specific payload of a [`Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph {
        rich_text: Vec<RichTextRun>,
    },
    Heading {
        level: u8,
        rich_text: Vec<RichTextRun>,
    },
    ToggleableHeading {
        level: u8,
        rich_text: Vec<RichTextRun>,
    },
    BulletedListItem {
        rich_text: Vec<RichTextRun>,
    },
    NumberedListItem {
        rich_text: Vec<RichTextRun>,
        /// Numeral carried by the source record. Rendering always renumbers by position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<u32>,
    },
    ToDo {
        rich_text: Vec<RichTextRun>,
        checked: bool,
    },
    Quote {
        rich_text: Vec<RichTextRun>,
    },
    Callout {
        rich_text: Vec<RichTextRun>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    Toggle {
        rich_text: Vec<RichTextRun>,
    },
    Code {
        rich_text: Vec<RichTextRun>,
        language: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        caption: Vec<RichTextRun>,
    },
    Equation {
        expression: String,
    },
    Divider,
    Table {
        table_width: usize,
        has_column_header: bool,
        has_row_header: bool,
    },
    TableRow {
        cells: Vec<Vec<RichTextRun>>,
    },
    ColumnList,
    Column {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width_ratio: Option<f64>,
    },
    Image(Media),
    Video(Media),
    Audio(Media),
    File(Media),
    Pdf(Media),
    Bookmark(Media),
    Embed(Media),
    Breadcrumb,
    TableOfContents,
    SyncedBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        synced_from: Option<String>,
    },
}

impl BlockKind {
    /// Wire name of the variant, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::ToggleableHeading { .. } => "toggleable_heading",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Code { .. } => "code",
            BlockKind::Equation { .. } => "equation",
            BlockKind::Divider => "divider",
            BlockKind::Table { .. } => "table",
            BlockKind::TableRow { .. } => "table_row",
            BlockKind::ColumnList => "column_list",
            BlockKind::Column { .. } => "column",
            BlockKind::Image(_) => "image",
            BlockKind::Video(_) => "video",
            BlockKind::Audio(_) => "audio",
            BlockKind::File(_) => "file",
            BlockKind::Pdf(_) => "pdf",
            BlockKind::Bookmark(_) => "bookmark",
            BlockKind::Embed(_) => "embed",
            BlockKind::Breadcrumb => "breadcrumb",
            BlockKind::TableOfContents => "table_of_contents",
            BlockKind::SyncedBlock { .. } => "synced_block",
        }
    }

    pub fn media(&self) -> Option<&Media> {
        match self {
            BlockKind::Image(m)
            | BlockKind::Video(m)
            | BlockKind::Audio(m)
            | BlockKind::File(m)
            | BlockKind::Pdf(m)
            | BlockKind::Bookmark(m)
            | BlockKind::Embed(m) => Some(m),
            _ => None,
        }
    }

    /// Primary rich text of the block, if the variant has one.
    pub fn rich_text(&self) -> Option<&[RichTextRun]> {
        match self {
            BlockKind::Paragraph { rich_text }
            | BlockKind::Heading { rich_text, .. }
            | BlockKind::ToggleableHeading { rich_text, .. }
            | BlockKind::BulletedListItem { rich_text }
            | BlockKind::NumberedListItem { rich_text, .. }
            | BlockKind::ToDo { rich_text, .. }
            | BlockKind::Quote { rich_text }
            | BlockKind::Callout { rich_text, .. }
            | BlockKind::Toggle { rich_text }
            | BlockKind::Code { rich_text, .. } => Some(rich_text),
            _ => None,
        }
    }

    /// Every rich text field of the block, mutably. Used by post-processing passes.
    pub(crate) fn rich_text_fields_mut(&mut self) -> Vec<&mut Vec<RichTextRun>> {
        match self {
            BlockKind::Paragraph { rich_text }
            | BlockKind::Heading { rich_text, .. }
            | BlockKind::ToggleableHeading { rich_text, .. }
            | BlockKind::BulletedListItem { rich_text }
            | BlockKind::NumberedListItem { rich_text, .. }
            | BlockKind::ToDo { rich_text, .. }
            | BlockKind::Quote { rich_text }
            | BlockKind::Callout { rich_text, .. }
            | BlockKind::Toggle { rich_text } => vec![rich_text],
            BlockKind::Code {
                rich_text, caption, ..
            } => vec![rich_text, caption],
            BlockKind::TableRow { cells } => cells.iter_mut().collect(),
            BlockKind::Image(m)
            | BlockKind::Video(m)
            | BlockKind::Audio(m)
            | BlockKind::File(m)
            | BlockKind::Pdf(m)
            | BlockKind::Bookmark(m)
            | BlockKind::Embed(m) => vec![&mut m.caption],
            _ => Vec::new(),
        }
    }
}

/// Structural violations detected by [`Block::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("table children must be table rows, found {found}")]
    NonRowInTable { found: &'static str },

    #[error("table needs at least one row and one column")]
    EmptyTable,

    #[error("table row has {actual} cells but the table is {expected} wide")]
    RowWidth { expected: usize, actual: usize },

    #[error("column list children must be columns, found {found}")]
    NonColumnInColumnList { found: &'static str },

    #[error("heading level {0} is outside 1..=3")]
    HeadingLevel(u8),
}

/// A node of the block tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: BlockKind, children: Vec<Block>) -> Self {
        Self { kind, children }
    }

    pub fn paragraph(rich_text: Vec<RichTextRun>) -> Self {
        Self::new(BlockKind::Paragraph { rich_text })
    }

    /// An empty paragraph, used as a vertical spacer.
    pub fn spacer() -> Self {
        Self::paragraph(Vec::new())
    }

    pub fn is_spacer(&self) -> bool {
        matches!(&self.kind, BlockKind::Paragraph { rich_text } if rich_text.is_empty())
            && self.children.is_empty()
    }

    /// Checks container invariants over the whole subtree.
    pub fn validate(&self) -> Result<(), TreeError> {
        match &self.kind {
            BlockKind::Table { table_width, .. } => {
                if self.children.is_empty() || *table_width == 0 {
                    return Err(TreeError::EmptyTable);
                }
                for child in &self.children {
                    match &child.kind {
                        BlockKind::TableRow { cells } if cells.len() == *table_width => {}
                        BlockKind::TableRow { cells } => {
                            return Err(TreeError::RowWidth {
                                expected: *table_width,
                                actual: cells.len(),
                            });
                        }
                        other => {
                            return Err(TreeError::NonRowInTable {
                                found: other.name(),
                            });
                        }
                    }
                }
            }
            BlockKind::ColumnList => {
                if let Some(child) = self
                    .children
                    .iter()
                    .find(|c| !matches!(c.kind, BlockKind::Column { .. }))
                {
                    return Err(TreeError::NonColumnInColumnList {
                        found: child.kind.name(),
                    });
                }
            }
            BlockKind::Heading { level, .. } | BlockKind::ToggleableHeading { level, .. }
                if !(1..=3).contains(level) =>
            {
                return Err(TreeError::HeadingLevel(*level));
            }
            _ => {}
        }
        self.children.iter().try_for_each(Block::validate)
    }

    /// Copy of the subtree with every rich text list merged via [`merge_adjacent`].
    ///
    /// Two trees that differ only in text run boundaries normalize to equal values.
    pub fn normalized(&self) -> Block {
        let mut kind = self.kind.clone();
        for field in kind.rich_text_fields_mut() {
            *field = merge_adjacent(field);
        }
        Block {
            kind,
            children: self.children.iter().map(Block::normalized).collect(),
        }
    }

    /// Number of blocks in the subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Block::count).sum::<usize>()
    }
}

/// Normalizes a whole forest. See [`Block::normalized`].
pub fn normalize_tree(blocks: &[Block]) -> Vec<Block> {
    blocks.iter().map(Block::normalized).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rich_text::{Annotations, RichTextRun};
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Block {
        Block::new(BlockKind::TableRow {
            cells: cells.iter().map(|c| vec![RichTextRun::plain(*c)]).collect(),
        })
    }

    #[test]
    fn table_with_rows_is_valid() {
        let table = Block::with_children(
            BlockKind::Table {
                table_width: 2,
                has_column_header: true,
                has_row_header: false,
            },
            vec![row(&["a", "b"]), row(&["c", "d"])],
        );
        assert_eq!(table.validate(), Ok(()));
    }

    #[test]
    fn table_rejects_paragraph_child() {
        let table = Block::with_children(
            BlockKind::Table {
                table_width: 1,
                has_column_header: false,
                has_row_header: false,
            },
            vec![Block::paragraph(vec![RichTextRun::plain("x")])],
        );
        assert_eq!(
            table.validate(),
            Err(TreeError::NonRowInTable { found: "paragraph" })
        );
    }

    #[test]
    fn table_without_rows_or_columns_is_rejected() {
        let kind = BlockKind::Table {
            table_width: 1,
            has_column_header: false,
            has_row_header: false,
        };
        assert_eq!(Block::new(kind.clone()).validate(), Err(TreeError::EmptyTable));

        let narrow = BlockKind::Table {
            table_width: 0,
            has_column_header: false,
            has_row_header: false,
        };
        let table = Block::with_children(narrow, vec![row(&[])]);
        assert_eq!(table.validate(), Err(TreeError::EmptyTable));
    }

    #[test]
    fn nested_column_list_is_checked() {
        let bad = Block::with_children(BlockKind::ColumnList, vec![Block::spacer()]);
        let toggle = Block::with_children(
            BlockKind::Toggle {
                rich_text: vec![RichTextRun::plain("t")],
            },
            vec![bad],
        );
        assert!(matches!(
            toggle.validate(),
            Err(TreeError::NonColumnInColumnList { .. })
        ));
    }

    #[test]
    fn normalized_merges_split_runs_recursively() {
        let bold = Annotations {
            bold: true,
            ..Annotations::default()
        };
        let split = Block::with_children(
            BlockKind::Toggle {
                rich_text: vec![RichTextRun::plain("Ti"), RichTextRun::plain("tle")],
            },
            vec![Block::paragraph(vec![
                RichTextRun::styled("a", bold),
                RichTextRun::styled("b", bold),
            ])],
        );
        let joined = Block::with_children(
            BlockKind::Toggle {
                rich_text: vec![RichTextRun::plain("Title")],
            },
            vec![Block::paragraph(vec![RichTextRun::styled("ab", bold)])],
        );
        assert_eq!(split.normalized(), joined);
    }

    #[test]
    fn serializes_with_type_tag() {
        let block = Block::new(BlockKind::Divider);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "divider" }));
    }

    #[test]
    fn deserializes_nested_children() {
        let json = r#"{"type":"toggle","rich_text":[{"type":"text","content":"T"}],"children":[{"type":"divider"}]}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.count(), 2);
        assert_eq!(block.kind.name(), "toggle");
    }
}
