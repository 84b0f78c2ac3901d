//! # Line Parser
//!
//! Turns normalized markup lines into a block tree.
//!
//! ## Modules
//!
//! - **`cursor`**: `LineCursor` read-only view handed to block handlers
//! - **`preprocess`**: Line endings, tabs and trailing whitespace
//! - **`frame`**: `ParentFrame` stack entries for open delimiter containers
//! - **`indent`**: Dedenting and indented-children lookahead
//! - **`validate`**: Column list checks applied when a frame closes
//! - **`postprocess`**: Splitting of over-long text runs
//!
//! ## Containers
//!
//! Indentation containers (list items, quotes, callouts, paragraphs) own the
//! deeper-indented lines that follow them; those lines are dedented and parsed
//! recursively. Delimiter containers (toggles, columns, synced blocks) are
//! pushed on a frame stack and buffer their lines until the bare closer.
//!
//! Inside a frame:
//! - a code fence is buffered whole, so a closer inside code never closes the frame
//! - an opener at the frame's content indentation is pushed as a nested frame
//! - a deeper opener is buffered raw up to its matching closer and left to the
//!   recursive parse, which keeps it under whatever indentation container owns it
//!
//! Frames still open at the end of input are closed with a warning and keep
//! whatever they buffered.

pub mod cursor;
pub mod frame;
pub mod indent;
pub mod postprocess;
pub mod preprocess;
pub mod validate;

use crate::blocks::kinds::code_fence::CodeFence;
use crate::blocks::registry::{ChildLayout, Delimiter, HandlerContext, Outcome, Registry};
use crate::model::Block;

use cursor::{LineCursor, indent_of, is_blank};
use frame::ParentFrame;
use indent::{dedent, indented_span};

/// Lines consumed by one step, and a container it opened.
type Step = (usize, Option<ParentFrame>);

/// Block-level parser over pre-processed lines.
#[derive(Debug, Clone, Copy)]
pub struct LineParser<'a> {
    registry: Registry,
    ctx: HandlerContext<'a>,
}

impl<'a> LineParser<'a> {
    pub fn new(ctx: HandlerContext<'a>) -> Self {
        Self {
            registry: Registry::default(),
            ctx,
        }
    }

    /// Parses a sequence of lines into sibling blocks. Never fails: any
    /// non-blank line becomes at least a paragraph.
    pub fn parse_lines(&self, lines: &[String]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut stack: Vec<ParentFrame> = Vec::new();
        let mut cursor = LineCursor::new(lines);

        while !cursor.is_end() {
            let line = cursor.current();
            if stack.last().is_some_and(|f| f.delimiter.closes(line)) {
                if let Some(frame) = stack.pop() {
                    log::debug!("Closing {} container", frame.block.kind.name());
                    let block = frame.finish(|lines| self.parse_lines(lines));
                    attach(&mut stack, &mut blocks, block);
                }
                cursor.advance(1);
                continue;
            }

            let (consumed, opened) = match stack.last_mut() {
                Some(frame) => self.buffer(&cursor, frame),
                None => self.dispatch(&cursor, &mut blocks),
            };
            if let Some(frame) = opened {
                log::debug!("Opening {} container", frame.block.kind.name());
                stack.push(frame);
            }
            cursor.advance(consumed.max(1));
        }

        while let Some(frame) = stack.pop() {
            log::warn!(
                "Unterminated {} container at end of input; keeping its content",
                frame.block.kind.name()
            );
            let block = frame.finish(|lines| self.parse_lines(lines));
            attach(&mut stack, &mut blocks, block);
        }
        blocks
    }

    /// Parses the block starting at the cursor outside of any frame.
    fn dispatch(&self, cursor: &LineCursor<'_>, blocks: &mut Vec<Block>) -> Step {
        let line = cursor.current();
        if is_blank(line) {
            let run = 1 + cursor.following().iter().take_while(|l| is_blank(l)).count();
            blocks.extend(std::iter::repeat_with(Block::spacer).take(run - 1));
            return (run, None);
        }

        let Some((outcome, handler)) = self.registry.parse(cursor, &self.ctx) else {
            blocks.push(Block::paragraph(self.ctx.codec.to_spans(line.trim())));
            return (1, None);
        };

        match outcome {
            Outcome::Open { block, delimiter } => (1, Some(ParentFrame::new(block, delimiter))),
            Outcome::Leaf {
                mut block,
                consumed,
            } => {
                let mut taken = 1 + consumed;
                if handler.layout == ChildLayout::Indented {
                    let rest = cursor.following().get(consumed..).unwrap_or_default();
                    let span = indented_span(rest, indent_of(line));
                    if span > 0 {
                        block.children.extend(self.parse_lines(&dedent(&rest[..span])));
                        taken += span;
                    }
                }
                blocks.push(block);
                (taken, None)
            }
        }
    }

    /// Buffers the line at the cursor into the innermost open frame.
    fn buffer(&self, cursor: &LineCursor<'_>, frame: &mut ParentFrame) -> Step {
        let line = cursor.current();
        if is_blank(line) {
            frame.push_line("");
            return (1, None);
        }
        if let Some((fence_len, _)) = CodeFence::opener(line) {
            let (span, _) = CodeFence::span(cursor.following(), fence_len);
            frame.push_lines(cursor.window(1 + span));
            return (1 + span, None);
        }

        let indent = indent_of(line);
        let content_indent = frame.content_indent(indent);
        if let Some((block, delimiter)) = self.registry.try_open(cursor, &self.ctx) {
            if indent <= content_indent {
                return (1, Some(ParentFrame::new(block, delimiter)));
            }
            if let Some(span) = self.matching_closer(cursor, delimiter) {
                frame.push_lines(cursor.window(1 + span));
                return (1 + span, None);
            }
        }
        frame.push_line(line);
        (1, None)
    }

    /// Offset from the cursor to the closer matching the opener at the cursor,
    /// counting nested openers of the same family and skipping code.
    fn matching_closer(&self, cursor: &LineCursor<'_>, delimiter: Delimiter) -> Option<usize> {
        let mut depth = 1usize;
        let mut scan = *cursor;
        scan.advance(1);
        while !scan.is_end() {
            let line = scan.current();
            if let Some((fence_len, _)) = CodeFence::opener(line) {
                let (span, _) = CodeFence::span(scan.following(), fence_len);
                scan.advance(1 + span);
                continue;
            }
            if delimiter.closes(line) {
                depth -= 1;
                if depth == 0 {
                    return Some(scan.index() - cursor.index());
                }
            } else if self
                .registry
                .try_open(&scan, &self.ctx)
                .is_some_and(|(_, d)| d == delimiter)
            {
                depth += 1;
            }
            scan.advance(1);
        }
        None
    }
}

fn attach(stack: &mut [ParentFrame], blocks: &mut Vec<Block>, block: Block) {
    match stack.last_mut() {
        Some(parent) => parent.push_block(block),
        None => blocks.push(block),
    }
}
