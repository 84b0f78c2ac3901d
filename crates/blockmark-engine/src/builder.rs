//! Fluent construction of block trees.
//!
//! Text arguments are inline markup, parsed with the builder's converter:
//!
//! ```
//! use blockmark_engine::DocumentBuilder;
//!
//! let markup = DocumentBuilder::new()
//!     .heading(1, "Release notes")
//!     .paragraph("Shipped **today**.")
//!     .toggle("Details", |b| b.bulleted_list(&["faster", "smaller"]))
//!     .to_markup();
//! assert!(markup.starts_with("# Release notes"));
//! ```

use crate::blocks::kinds::heading::Heading;
use crate::document::Converter;
use crate::model::{Block, BlockKind, Media, RichTextRun};
use crate::parsing::validate;

#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    converter: Converter,
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder that parses and renders with `converter`.
    pub fn with_converter(converter: Converter) -> Self {
        Self {
            converter,
            blocks: Vec::new(),
        }
    }

    fn spans(&self, markup: &str) -> Vec<RichTextRun> {
        self.converter.codec().to_spans(markup)
    }

    fn nested(&self, f: impl FnOnce(DocumentBuilder) -> DocumentBuilder) -> Vec<Block> {
        f(DocumentBuilder::with_converter(self.converter.clone())).blocks
    }

    /// Appends an already built block.
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Heading at `level`, clamped to 1..=3.
    pub fn heading(self, level: u8, text: &str) -> Self {
        let kind = BlockKind::Heading {
            level: level.clamp(1, Heading::MAX_LEVEL),
            rich_text: self.spans(text),
        };
        self.block(Block::new(kind))
    }

    pub fn paragraph(self, text: &str) -> Self {
        let block = Block::paragraph(self.spans(text));
        self.block(block)
    }

    pub fn quote(self, text: &str) -> Self {
        let kind = BlockKind::Quote {
            rich_text: self.spans(text),
        };
        self.block(Block::new(kind))
    }

    pub fn callout(self, text: &str, icon: Option<&str>) -> Self {
        let kind = BlockKind::Callout {
            rich_text: self.spans(text),
            icon: icon.map(str::to_string),
        };
        self.block(Block::new(kind))
    }

    pub fn bulleted_list(mut self, items: &[&str]) -> Self {
        for item in items {
            let rich_text = self.spans(item);
            self = self.block(Block::new(BlockKind::BulletedListItem { rich_text }));
        }
        self
    }

    pub fn numbered_list(mut self, items: &[&str]) -> Self {
        for (i, item) in items.iter().enumerate() {
            let kind = BlockKind::NumberedListItem {
                rich_text: self.spans(item),
                number: u32::try_from(i + 1).ok(),
            };
            self = self.block(Block::new(kind));
        }
        self
    }

    pub fn todo(self, text: &str, checked: bool) -> Self {
        let kind = BlockKind::ToDo {
            rich_text: self.spans(text),
            checked,
        };
        self.block(Block::new(kind))
    }

    /// Toggle whose children are built by `f`.
    pub fn toggle(self, title: &str, f: impl FnOnce(DocumentBuilder) -> DocumentBuilder) -> Self {
        let kind = BlockKind::Toggle {
            rich_text: self.spans(title),
        };
        let children = self.nested(f);
        self.block(Block::with_children(kind, children))
    }

    pub fn toggleable_heading(
        self,
        level: u8,
        title: &str,
        f: impl FnOnce(DocumentBuilder) -> DocumentBuilder,
    ) -> Self {
        let kind = BlockKind::ToggleableHeading {
            level: level.clamp(1, Heading::MAX_LEVEL),
            rich_text: self.spans(title),
        };
        let children = self.nested(f);
        self.block(Block::with_children(kind, children))
    }

    /// Code block. `None` uses the converter's default language.
    pub fn code(self, code: &str, language: Option<&str>) -> Self {
        let language = language.map_or_else(
            || self.converter.options().default_code_language.clone(),
            str::to_string,
        );
        let rich_text = if code.is_empty() {
            Vec::new()
        } else {
            vec![RichTextRun::plain(code)]
        };
        self.block(Block::new(BlockKind::Code {
            rich_text,
            language,
            caption: Vec::new(),
        }))
    }

    pub fn equation(self, expression: &str) -> Self {
        self.block(Block::new(BlockKind::Equation {
            expression: expression.to_string(),
        }))
    }

    /// Table with a header row. Short rows are padded with empty cells, and a
    /// table is at least one column wide.
    pub fn table(self, header: &[&str], rows: &[&[&str]]) -> Self {
        let table_width = rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
            .max(1);
        let children = std::iter::once(header)
            .chain(rows.iter().copied())
            .map(|row| {
                let mut cells: Vec<Vec<RichTextRun>> =
                    row.iter().map(|cell| self.spans(cell)).collect();
                cells.resize_with(table_width, Vec::new);
                Block::new(BlockKind::TableRow { cells })
            })
            .collect();
        let kind = BlockKind::Table {
            table_width,
            has_column_header: true,
            has_row_header: false,
        };
        self.block(Block::with_children(kind, children))
    }

    /// Column list whose columns are added by `f` with [`DocumentBuilder::column`].
    /// Anything else added inside is dropped.
    pub fn columns(self, f: impl FnOnce(DocumentBuilder) -> DocumentBuilder) -> Self {
        let mut list = Block::with_children(BlockKind::ColumnList, self.nested(f));
        validate::retain_columns(&mut list);
        validate::check_columns(&list);
        self.block(list)
    }

    pub fn column(
        self,
        width_ratio: Option<f64>,
        f: impl FnOnce(DocumentBuilder) -> DocumentBuilder,
    ) -> Self {
        let children = self.nested(f);
        self.block(Block::with_children(BlockKind::Column { width_ratio }, children))
    }

    pub fn image(self, url: &str, caption: Option<&str>) -> Self {
        let mut media = Media::new(url);
        media.caption = caption.map(|c| self.spans(c)).unwrap_or_default();
        self.block(Block::new(BlockKind::Image(media)))
    }

    pub fn bookmark(self, url: &str) -> Self {
        self.block(Block::new(BlockKind::Bookmark(Media::new(url))))
    }

    pub fn divider(self) -> Self {
        self.block(Block::new(BlockKind::Divider))
    }

    pub fn space(self) -> Self {
        self.block(Block::spacer())
    }

    pub fn breadcrumb(self) -> Self {
        self.block(Block::new(BlockKind::Breadcrumb))
    }

    pub fn table_of_contents(self) -> Self {
        self.block(Block::new(BlockKind::TableOfContents))
    }

    pub fn build(self) -> Vec<Block> {
        self.blocks
    }

    pub fn to_markup(&self) -> String {
        self.converter.render(&self.blocks)
    }
}
