//! # Block Registry
//!
//! Ordered table of block handlers. The line parser asks each handler in turn
//! whether it claims the current line; the tree renderer asks which handler
//! renders a given block.
//!
//! ## Modules
//!
//! - **`registry`**: `BlockHandler`, `Registry`, `Outcome`, `Delimiter`, `HANDLERS`
//! - **`kinds`**: One module per construct, each owning its delimiters

pub mod kinds;
pub mod registry;

pub use registry::{
    BlockHandler, ChildLayout, Delimiter, HANDLERS, HandlerContext, Outcome, Registry, RenderInput,
};
