use crate::blocks::registry::{
    BlockHandler, ChildLayout, Delimiter, HandlerContext, Outcome, Registry, RenderInput,
};
use crate::model::{Block, BlockKind};
use crate::parsing::cursor::LineCursor;
use crate::rich_text::kinds::Escape;

use super::caption::Caption;

/// Catch-all. Always claims a line, so the parser never stalls.
pub const HANDLER: BlockHandler = BlockHandler {
    name: "paragraph",
    layout: ChildLayout::Indented,
    can_parse: |_| true,
    parse,
    can_render: |block| matches!(block.kind, BlockKind::Paragraph { .. }),
    render,
};

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    Some(Outcome::Leaf {
        block: Block::paragraph(ctx.codec.to_spans(cursor.current().trim())),
        consumed: 0,
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Paragraph { rich_text } = &block.kind else {
        return String::new();
    };
    let markup = input.codec.to_markup(rich_text);
    input.with_children(format!("{}{}", input.pad(), escape_line(markup.trim_start())))
}

fn is_ambiguous(markup: &str) -> bool {
    let closers = [Delimiter::Toggle, Delimiter::Column, Delimiter::Synced];
    closers.iter().any(|d| d.closes(markup))
        || Caption::parse(markup).is_some()
        || Registry::default().claimant(markup, HANDLER.name).is_some()
}

/// Escapes a paragraph line that another handler would otherwise claim:
/// a leading `\` before punctuation, or `1\.` for a numeral.
pub fn escape_line(markup: &str) -> String {
    if !is_ambiguous(markup) {
        return markup.to_string();
    }
    let backslash = Escape::BACKSLASH as char;
    if markup.starts_with(|c: char| c.is_ascii_punctuation()) {
        return format!("{backslash}{markup}");
    }
    let digits = markup.len() - markup.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && markup[digits..].starts_with('.') {
        return format!("{}{backslash}{}", &markup[..digits], &markup[digits..]);
    }
    markup.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("hello", "hello")]
    #[case::bullet("- not a list", r"\- not a list")]
    #[case::heading("# not a heading", r"\# not a heading")]
    #[case::quote("> said", r"\> said")]
    #[case::numeral("3. third", r"3\. third")]
    #[case::decimal("1.5 cups", "1.5 cups")]
    #[case::divider("---", r"\---")]
    #[case::toggle_closer("+++", r"\+++")]
    #[case::column_closer(":::", r"\:::")]
    #[case::pipe_row("|a|", r"\|a|")]
    fn escapes_claimed_lines(#[case] markup: &str, #[case] expected: &str) {
        assert_eq!(escape_line(markup), expected);
    }
}
