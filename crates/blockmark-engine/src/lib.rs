//! # blockmark-engine
//!
//! Converts between a line-oriented block markup and a typed block tree.
//!
//! ## Modules
//!
//! - **`model`**: `Block`, `BlockKind` and the rich text run types
//! - **`rich_text`**: Inline codec, `MentionResolver`
//! - **`blocks`**: Block registry and one handler module per construct
//! - **`parsing`**: Line parser with indentation and delimiter containers
//! - **`render`**: Tree renderer
//! - **`document`**: `Converter` facade
//! - **`builder`**: `DocumentBuilder` for constructing trees in code

pub mod blocks;
pub mod builder;
pub mod document;
pub mod model;
pub mod options;
pub mod parsing;
pub mod render;
pub mod rich_text;

// Re-export key types for easier usage
pub use builder::DocumentBuilder;
pub use document::{Converter, parse, render};
pub use model::{
    Annotations, Block, BlockKind, BlockTree, Color, Media, Mention, MentionKind, RichTextRun,
    TextRun, TreeError, merge_adjacent, normalize_tree, plain_text,
};
pub use options::ConverterOptions;
pub use rich_text::{MentionResolver, NoopResolver, ResolveError, RichTextCodec, StaticResolver};
