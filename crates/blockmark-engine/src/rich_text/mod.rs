//! # Rich Text Codec
//!
//! Converts between one line of inline markup and a list of [`RichTextRun`]s.
//!
//! ## Modules
//!
//! - **`kinds`**: Inline constructs with owned delimiters (emphasis, code, links, colors, mentions)
//! - **`cursor`**: `Cursor` for byte lookahead with char-safe advancing
//! - **`parser`**: `parse_spans()` markup to runs
//! - **`serializer`**: `serialize_spans()` runs to markup, with contextual escaping
//! - **`resolver`**: `MentionResolver` lookup service for mention display names
//!
//! ## Raw Zones
//!
//! Code spans and inline equations are raw: `` `**x**` `` is code containing
//! asterisks, not bold text.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod resolver;
pub mod serializer;

use std::fmt;
use std::sync::Arc;

use crate::model::RichTextRun;

pub use parser::parse_spans;
pub use resolver::{MentionResolver, NoopResolver, ResolveError, StaticResolver};
pub use serializer::{escape_text, serialize_spans};

/// Inline codec bound to a mention resolver.
#[derive(Clone)]
pub struct RichTextCodec {
    resolver: Arc<dyn MentionResolver>,
}

impl RichTextCodec {
    pub fn new(resolver: Arc<dyn MentionResolver>) -> Self {
        Self { resolver }
    }

    pub fn to_markup(&self, runs: &[RichTextRun]) -> String {
        serialize_spans(runs, self.resolver.as_ref())
    }

    pub fn to_spans(&self, markup: &str) -> Vec<RichTextRun> {
        parse_spans(markup, self.resolver.as_ref())
    }

    pub fn resolver(&self) -> &dyn MentionResolver {
        self.resolver.as_ref()
    }
}

impl Default for RichTextCodec {
    fn default() -> Self {
        Self::new(Arc::new(NoopResolver))
    }
}

impl fmt::Debug for RichTextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichTextCodec").finish_non_exhaustive()
    }
}
