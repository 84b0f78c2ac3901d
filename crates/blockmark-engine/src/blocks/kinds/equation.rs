use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// Block equation: `$$expr$$` on one line, or `$$` fences around several lines.
pub struct BlockEquation;

impl BlockEquation {
    pub const FENCE: &'static str = "$$";

    fn single_line(line: &str) -> Option<&str> {
        let t = line.trim();
        if t.len() <= 2 * Self::FENCE.len() {
            return None;
        }
        t.strip_prefix(Self::FENCE)?.strip_suffix(Self::FENCE).map(str::trim)
    }

    fn is_fence(line: &str) -> bool {
        line.trim() == Self::FENCE
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "equation",
    layout: ChildLayout::None,
    can_parse: |cursor| {
        BlockEquation::is_fence(cursor.current())
            || BlockEquation::single_line(cursor.current()).is_some()
    },
    parse,
    can_render: |block| matches!(block.kind, BlockKind::Equation { .. }),
    render,
};

fn parse(cursor: &LineCursor<'_>, _ctx: &HandlerContext<'_>) -> Option<Outcome> {
    if let Some(expression) = BlockEquation::single_line(cursor.current()) {
        return Some(Outcome::Leaf {
            block: Block::new(BlockKind::Equation {
                expression: expression.to_string(),
            }),
            consumed: 0,
        });
    }
    let following = cursor.following();
    let (body, consumed) = match following.iter().position(|l| BlockEquation::is_fence(l)) {
        Some(close) => (&following[..close], close + 1),
        None => {
            log::warn!("Unterminated equation block, keeping the rest of the input");
            (following, following.len())
        }
    };
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::Equation {
            expression: body.join("\n"),
        }),
        consumed,
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Equation { expression } = &block.kind else {
        return String::new();
    };
    let pad = input.pad();
    let fence = BlockEquation::FENCE;
    let own = if !expression.is_empty() && !expression.contains('\n') {
        format!("{pad}{fence}{}{fence}", expression.trim())
    } else {
        let mut lines = vec![format!("{pad}{fence}")];
        lines.extend(expression.split('\n').filter(|_| !expression.is_empty()).map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{pad}{l}")
            }
        }));
        lines.push(format!("{pad}{fence}"));
        lines.join("\n")
    };
    input.with_children(own)
}
