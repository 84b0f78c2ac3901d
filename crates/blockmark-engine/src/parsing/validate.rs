use crate::model::{Block, BlockKind};

/// Tolerance for column ratios summing to one.
const RATIO_EPSILON: f64 = 0.01;

/// Drops children of a ColumnList that are not Columns.
pub fn retain_columns(block: &mut Block) {
    if !matches!(block.kind, BlockKind::ColumnList) {
        return;
    }
    block.children.retain(|child| {
        let keep = matches!(child.kind, BlockKind::Column { .. });
        if !keep {
            log::warn!(
                "Dropping {} inside a column list; only columns are allowed",
                child.kind.name()
            );
        }
        keep
    });
}

/// Warns about a ColumnList with fewer than two columns, or whose explicit
/// ratios do not add up to one.
pub fn check_columns(block: &Block) {
    if !matches!(block.kind, BlockKind::ColumnList) {
        return;
    }
    if block.children.len() < 2 {
        log::warn!(
            "Column list has {} column(s); at least two are expected",
            block.children.len()
        );
    }
    let ratios: Option<Vec<f64>> = block
        .children
        .iter()
        .map(|c| match c.kind {
            BlockKind::Column { width_ratio } => width_ratio,
            _ => None,
        })
        .collect();
    if let Some(ratios) = ratios
        && !ratios.is_empty()
    {
        let sum: f64 = ratios.iter().sum();
        if (sum - 1.0).abs() > RATIO_EPSILON {
            log::warn!("Column ratios sum to {sum:.2}, expected 1.0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_columns_are_dropped() {
        let mut list = Block::with_children(BlockKind::ColumnList, vec![
            Block::new(BlockKind::Column { width_ratio: None }),
            Block::new(BlockKind::Divider),
            Block::new(BlockKind::Column { width_ratio: None }),
        ]);
        retain_columns(&mut list);
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.validate(), Ok(()));
    }

    #[test]
    fn other_blocks_are_untouched() {
        let mut toggle = Block::with_children(BlockKind::Toggle { rich_text: vec![] }, vec![
            Block::new(BlockKind::Divider),
        ]);
        retain_columns(&mut toggle);
        check_columns(&toggle);
        assert_eq!(toggle.children.len(), 1);
    }
}
