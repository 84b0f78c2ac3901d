use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;

/// `[callout](text "icon")`, `[callout](text)` or `[callout] text "icon"`.
pub struct Callout;

impl Callout {
    pub const MARKER: &'static str = "[callout]";
    pub const QUOTE: char = '"';

    /// Splits `(text, icon)` from the body of a callout line.
    fn parse_body(line: &str) -> Option<(&str, Option<&str>)> {
        let rest = line.trim().strip_prefix(Self::MARKER)?;
        let body = if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            inner
        } else if rest.starts_with(char::is_whitespace) {
            rest.trim()
        } else {
            return None;
        };
        Some(Self::split_icon(body))
    }

    /// A trailing `"icon"` preceded by whitespace is the icon. An escaped final
    /// quote belongs to the text.
    fn split_icon(body: &str) -> (&str, Option<&str>) {
        let Some(without_close) = body.strip_suffix(Self::QUOTE) else {
            return (body.trim(), None);
        };
        if without_close.ends_with('\\') {
            return (body.trim(), None);
        }
        let Some(open) = without_close.rfind(Self::QUOTE) else {
            return (body.trim(), None);
        };
        let text = &without_close[..open];
        let icon = &without_close[open + 1..];
        if icon.trim().is_empty() || !(text.is_empty() || text.ends_with(char::is_whitespace)) {
            return (body.trim(), None);
        }
        (text.trim(), Some(icon.trim()))
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "callout",
    layout: ChildLayout::Indented,
    can_parse: |cursor| Callout::parse_body(cursor.current()).is_some(),
    parse,
    can_render: |block| matches!(block.kind, BlockKind::Callout { .. }),
    render,
};

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let (text, icon) = Callout::parse_body(cursor.current())?;
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::Callout {
            rich_text: ctx.codec.to_spans(text),
            icon: icon.map(str::to_string),
        }),
        consumed: 0,
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Callout { rich_text, icon } = &block.kind else {
        return String::new();
    };
    let mut markup = input.codec.to_markup(rich_text);
    let body = match icon.as_deref().filter(|i| !i.trim().is_empty()) {
        Some(icon) => format!("{markup} \"{icon}\""),
        None => {
            if markup.ends_with(Callout::QUOTE) {
                markup.insert(markup.len() - 1, '\\');
            }
            markup
        }
    };
    let own = format!("{}{}({body})", input.pad(), Callout::MARKER);
    input.with_children(own)
}
