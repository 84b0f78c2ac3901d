use crate::model::Block;
use crate::options::ConverterOptions;
use crate::parsing::cursor::LineCursor;
use crate::rich_text::RichTextCodec;

use super::kinds::{
    callout, code_fence, column, divider, equation, heading, list, marker, media, paragraph,
    quote, synced, table, toggle,
};

/// Shared services handed to every parse call.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub codec: &'a RichTextCodec,
    pub options: &'a ConverterOptions,
}

/// Everything a handler needs to render one block.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub codec: &'a RichTextCodec,
    pub options: &'a ConverterOptions,
    /// Nesting level of the block being rendered.
    pub indent: usize,
    /// Children already rendered at `indent + 1`, or empty.
    pub children: &'a str,
}

impl RenderInput<'_> {
    /// Leading whitespace for this block's own lines.
    pub fn pad(&self) -> String {
        self.options.indent(self.indent)
    }

    /// `own` followed by the indented children, if any.
    pub fn with_children(&self, own: String) -> String {
        if self.children.is_empty() {
            own
        } else {
            format!("{own}\n{}", self.children)
        }
    }

    /// Opener line, children, then the bare closer at this block's indent.
    pub fn delimited(&self, opener: String, delimiter: Delimiter) -> String {
        let closer = format!("{}{}", self.pad(), delimiter.closer());
        if self.children.is_empty() {
            format!("{opener}\n{closer}")
        } else {
            format!("{opener}\n{}\n{closer}", self.children)
        }
    }
}

/// Delimiter families for containers closed by a bare marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Toggle,
    Column,
    Synced,
}

impl Delimiter {
    pub fn closer(self) -> &'static str {
        match self {
            Delimiter::Toggle => toggle::Toggle::DELIMITER,
            Delimiter::Column => column::Column::DELIMITER,
            Delimiter::Synced => synced::Synced::DELIMITER,
        }
    }

    /// True for a line that is exactly this family's closer.
    pub fn closes(self, line: &str) -> bool {
        line.trim() == self.closer()
    }
}

/// Result of a successful handler parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A finished block; `consumed` counts lines after the current one that it absorbed.
    Leaf { block: Block, consumed: usize },
    /// An opening delimiter line. The parser collects children until the closer.
    Open { block: Block, delimiter: Delimiter },
}

/// How a handler's block takes children from the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildLayout {
    /// No children are read from the markup.
    None,
    /// Following lines indented deeper than this one.
    Indented,
    /// Lines up to the matching closer.
    Delimited,
}

/// One entry of the block registry.
pub struct BlockHandler {
    pub name: &'static str,
    pub layout: ChildLayout,
    pub can_parse: fn(&LineCursor<'_>) -> bool,
    /// Builds the block. `None` hands the line to the next handler.
    pub parse: fn(&LineCursor<'_>, &HandlerContext<'_>) -> Option<Outcome>,
    pub can_render: fn(&Block) -> bool,
    pub render: fn(&Block, &RenderInput<'_>) -> String,
}

impl std::fmt::Debug for BlockHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHandler")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Handlers in parse priority: multi-line and delimiter-bound handlers first,
/// the paragraph catch-all last.
pub static HANDLERS: &[BlockHandler] = &[
    code_fence::HANDLER,
    equation::HANDLER,
    table::HANDLER,
    table::ROW_HANDLER,
    column::COLUMN_HANDLER,
    column::COLUMN_LIST_HANDLER,
    toggle::TOGGLEABLE_HEADING_HANDLER,
    toggle::TOGGLE_HANDLER,
    synced::HANDLER,
    heading::HANDLER,
    divider::HANDLER,
    list::TODO_HANDLER,
    list::BULLETED_HANDLER,
    list::NUMBERED_HANDLER,
    quote::HANDLER,
    callout::HANDLER,
    media::HANDLER,
    marker::BREADCRUMB_HANDLER,
    marker::TABLE_OF_CONTENTS_HANDLER,
    marker::SPACE_HANDLER,
    paragraph::HANDLER,
];

/// Ordered handler table with first-match dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    handlers: &'static [BlockHandler],
}

impl Default for Registry {
    fn default() -> Self {
        Self { handlers: HANDLERS }
    }
}

impl Registry {
    pub fn handlers(&self) -> &'static [BlockHandler] {
        self.handlers
    }

    /// Parses the current line with the first handler that claims it.
    pub fn parse(
        &self,
        cursor: &LineCursor<'_>,
        ctx: &HandlerContext<'_>,
    ) -> Option<(Outcome, &'static BlockHandler)> {
        self.handlers
            .iter()
            .filter(|h| (h.can_parse)(cursor))
            .find_map(|h| (h.parse)(cursor, ctx).map(|outcome| (outcome, h)))
    }

    /// Parses the current line only if it opens a delimiter container.
    pub fn try_open(
        &self,
        cursor: &LineCursor<'_>,
        ctx: &HandlerContext<'_>,
    ) -> Option<(Block, Delimiter)> {
        let handler = self.handlers.iter().find(|h| (h.can_parse)(cursor))?;
        if handler.layout != ChildLayout::Delimited {
            return None;
        }
        match (handler.parse)(cursor, ctx)? {
            Outcome::Open { block, delimiter } => Some((block, delimiter)),
            Outcome::Leaf { .. } => None,
        }
    }

    /// Name of the first handler, other than `except`, that claims a single line.
    pub fn claimant(&self, line: &str, except: &str) -> Option<&'static str> {
        let lines = [line.to_string()];
        let cursor = LineCursor::new(&lines);
        self.handlers
            .iter()
            .filter(|h| h.name != except)
            .find(|h| (h.can_parse)(&cursor))
            .map(|h| h.name)
    }

    pub fn renderer_for(&self, block: &Block) -> Option<&'static BlockHandler> {
        self.handlers.iter().find(|h| (h.can_render)(block))
    }
}
