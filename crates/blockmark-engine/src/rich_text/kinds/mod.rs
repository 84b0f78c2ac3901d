//! # Inline Kinds
//!
//! Each inline construct owns its delimiters. The parser and serializer read
//! these constants and never hardcode `**`, `` ` `` or `(red:`.
//!
//! ## Types
//!
//! - **`Emphasis`**: `**` bold, `__` underline, `~~` strikethrough, `*`/`_` italic
//! - **`CodeSpan`**: `` ` `` raw zone, longer fences when the code holds ticks
//! - **`InlineEquation`**: `$...$` raw zone
//! - **`Link`**: `[text](url)`
//! - **`ColorGroup`**: `(red:...)` foreground, `==(red:...)==` background
//! - **`MentionToken`**: `@page[...]`, `@database[...]`, `@user[...]`, `@date[...]`
//! - **`Escape`** and **`LineBreak`**: `\x` literals and `<br>`

pub mod code_span;
pub mod color_group;
pub mod emphasis;
pub mod equation;
pub mod escape;
pub mod link;
pub mod mention;

pub use code_span::CodeSpan;
pub use color_group::ColorGroup;
pub use emphasis::Emphasis;
pub use equation::InlineEquation;
pub use escape::{Escape, LineBreak};
pub use link::Link;
pub use mention::MentionToken;

/// End of the raw zone opening at `i`: a code span, an unmatched tick run, or an
/// inline equation. Scanners that split markup step over these whole.
pub fn raw_zone_end(s: &[u8], i: usize) -> Option<usize> {
    match *s.get(i)? {
        CodeSpan::TICK => Some(CodeSpan::skip(s, i)),
        InlineEquation::DOLLAR => InlineEquation::close(s, i).map(|close| close + 1),
        _ => None,
    }
}
