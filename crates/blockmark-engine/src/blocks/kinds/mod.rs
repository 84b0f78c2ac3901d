//! # Block Kinds
//!
//! One module per markup construct. Each owns its delimiters as associated
//! constants and exposes the registry entries that parse and render it.
//!
//! ## Handlers
//!
//! - **`code_fence`**: ```` ``` ```` raw zone with language and caption
//! - **`equation`**: `$$` block equations
//! - **`table`**: `| a | b |` rows with an optional header separator
//! - **`column`**: `::: columns` / `::: column 0.5` layouts
//! - **`toggle`**: `+++ title` and `+++# heading` containers
//! - **`synced`**: `>>> Synced Block` originals and `>>> Synced from: id` references
//! - **`heading`**, **`divider`**, **`list`**, **`quote`**, **`callout`**
//! - **`media`**: `[image](url)` and friends, `![alt](url)`
//! - **`marker`**: `[breadcrumb]`, `[toc]`, `[space]`
//! - **`paragraph`**: catch-all, with escaping of lines another handler would claim
//! - **`caption`**: the `[caption] text` line shared by media and code

pub mod callout;
pub mod caption;
pub mod code_fence;
pub mod column;
pub mod divider;
pub mod equation;
pub mod heading;
pub mod list;
pub mod marker;
pub mod media;
pub mod paragraph;
pub mod quote;
pub mod synced;
pub mod table;
pub mod toggle;
