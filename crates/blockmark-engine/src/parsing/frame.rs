use crate::blocks::registry::Delimiter;
use crate::model::Block;

use super::indent::dedent;
use super::validate;

/// Buffered content of an open delimiter container.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEntry {
    /// A raw line, parsed when the frame closes.
    Line(String),
    /// A nested container that was opened and closed inside this frame.
    Block(Block),
}

/// An open delimiter container on the parser's stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentFrame {
    pub block: Block,
    pub delimiter: Delimiter,
    pub entries: Vec<FrameEntry>,
    /// Indentation of the first content line or nested opener.
    pub content_indent: Option<usize>,
}

impl ParentFrame {
    pub fn new(block: Block, delimiter: Delimiter) -> Self {
        Self {
            block,
            delimiter,
            entries: Vec::new(),
            content_indent: None,
        }
    }

    /// Content indentation, fixed by the first non-blank line seen.
    pub fn content_indent(&mut self, indent: usize) -> usize {
        *self.content_indent.get_or_insert(indent)
    }

    pub fn push_line(&mut self, line: &str) {
        self.entries.push(FrameEntry::Line(line.to_string()));
    }

    pub fn push_lines(&mut self, lines: &[String]) {
        self.entries
            .extend(lines.iter().cloned().map(FrameEntry::Line));
    }

    pub fn push_block(&mut self, block: Block) {
        self.entries.push(FrameEntry::Block(block));
    }

    /// Builds the container. Each run of buffered lines is dedented and handed
    /// to `parse`; nested blocks keep their position between the runs.
    pub fn finish(self, parse: impl Fn(&[String]) -> Vec<Block>) -> Block {
        let mut block = self.block;
        let mut run: Vec<String> = Vec::new();
        for entry in self.entries {
            match entry {
                FrameEntry::Line(line) => run.push(line),
                FrameEntry::Block(child) => {
                    block.children.extend(parse(&dedent(&run)));
                    run.clear();
                    block.children.push(child);
                }
            }
        }
        block.children.extend(parse(&dedent(&run)));

        validate::retain_columns(&mut block);
        validate::check_columns(&block);
        block
    }
}
