//! Typed block tree and rich text data model.
//!
//! ## Modules
//!
//! - [`block`] - Block variants, children and structural validation
//! - [`rich_text`] - Text runs, annotations, colors and mentions

pub mod block;
pub mod rich_text;

pub use block::{Block, BlockKind, Media, TreeError, normalize_tree};
pub use rich_text::{
    Annotations, Color, Mention, MentionKind, RichTextRun, TextRun, merge_adjacent, plain_text,
};

/// An ordered forest of top-level blocks.
pub type BlockTree = Vec<Block>;
