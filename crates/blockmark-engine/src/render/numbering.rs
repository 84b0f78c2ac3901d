use crate::blocks::kinds::list::ListItem;
use crate::model::{Block, BlockKind};

/// Rewrites the placeholder numeral of each numbered list item so that a run
/// of consecutive items reads 1, 2, 3. Any other block restarts the count.
pub fn renumber(blocks: &[Block], parts: &mut [String], pad: &str) {
    let mut n = 0u32;
    for (block, part) in blocks.iter().zip(parts.iter_mut()) {
        if !matches!(block.kind, BlockKind::NumberedListItem { .. }) {
            n = 0;
            continue;
        }
        n += 1;
        if let Some(rest) = part
            .strip_prefix(pad)
            .and_then(|r| r.strip_prefix(ListItem::NUMBER))
        {
            *part = format!("{pad}{n}.{rest}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RichTextRun;
    use pretty_assertions::assert_eq;

    fn numbered() -> Block {
        Block::new(BlockKind::NumberedListItem {
            rich_text: vec![RichTextRun::plain("x")],
            number: Some(7),
        })
    }

    #[test]
    fn runs_restart_after_other_blocks() {
        let blocks = vec![numbered(), numbered(), Block::spacer(), numbered()];
        let mut parts = vec![
            "  1. x".to_string(),
            "  1. x".to_string(),
            "  [space]".to_string(),
            "  1. x".to_string(),
        ];
        renumber(&blocks, &mut parts, "  ");
        assert_eq!(parts, vec!["  1. x", "  2. x", "  [space]", "  1. x"]);
    }
}
