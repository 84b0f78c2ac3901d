use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind, RichTextRun, plain_text};
use crate::parsing::cursor::LineCursor;

use super::caption::Caption;

/// Fenced code block. Content lines are a raw zone: no block or inline parsing.
pub struct CodeFence;

impl CodeFence {
    pub const TICK: char = '`';
    pub const MIN_LEN: usize = 3;
    pub const CAPTION_QUOTE: char = '"';

    /// `(fence_len, info)` for an opening fence line.
    pub fn opener(line: &str) -> Option<(usize, &str)> {
        let t = line.trim();
        let len = t.len() - t.trim_start_matches(Self::TICK).len();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = &t[len..];
        (!info.contains(Self::TICK)).then_some((len, info.trim()))
    }

    /// True for a bare fence at least `fence_len` ticks long.
    pub fn closes(line: &str, fence_len: usize) -> bool {
        let t = line.trim();
        t.len() >= fence_len && t.chars().all(|c| c == Self::TICK)
    }

    /// Number of lines after an opener up to and including its closer.
    /// Unterminated fences run to the end of `following`.
    pub fn span(following: &[String], fence_len: usize) -> (usize, bool) {
        match following.iter().position(|l| Self::closes(l, fence_len)) {
            Some(close) => (close + 1, true),
            None => (following.len(), false),
        }
    }

    /// Splits `lang "caption"` fence info.
    fn split_info(info: &str) -> (&str, Option<&str>) {
        match info.find(Self::CAPTION_QUOTE) {
            Some(q) => {
                let caption = info[q + 1..].trim_end_matches(Self::CAPTION_QUOTE);
                (info[..q].trim(), Some(caption))
            }
            None => (info, None),
        }
    }

    /// Shortest fence longer than any tick run that starts a content line.
    fn fence_for(content: &str) -> String {
        let longest = content
            .lines()
            .map(|l| {
                let t = l.trim_start();
                t.len() - t.trim_start_matches(Self::TICK).len()
            })
            .max()
            .unwrap_or(0);
        Self::TICK.to_string().repeat(Self::MIN_LEN.max(longest + 1))
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "code",
    layout: ChildLayout::None,
    can_parse: |cursor| CodeFence::opener(cursor.current()).is_some(),
    parse,
    can_render: |block| matches!(block.kind, BlockKind::Code { .. }),
    render,
};

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let (fence_len, info) = CodeFence::opener(cursor.current())?;
    let following = cursor.following();
    let (span, closed) = CodeFence::span(following, fence_len);
    let content_len = if closed { span - 1 } else { span };
    if !closed {
        log::warn!("Unterminated code fence, keeping {content_len} lines as code");
    }
    let content = following[..content_len].join("\n");

    let (language, inline_caption) = CodeFence::split_info(info);
    let language = if language.is_empty() {
        ctx.options.default_code_language.clone()
    } else {
        language.to_string()
    };

    let mut consumed = span;
    let mut caption = inline_caption.map(|c| ctx.codec.to_spans(c)).unwrap_or_default();
    if closed && let Some(markup) = cursor.peek(span + 1).and_then(Caption::parse) {
        caption = ctx.codec.to_spans(markup);
        consumed += 1;
    }

    let rich_text = if content.is_empty() {
        Vec::new()
    } else {
        vec![RichTextRun::plain(content)]
    };
    Some(Outcome::Leaf {
        block: Block::new(BlockKind::Code {
            rich_text,
            language,
            caption,
        }),
        consumed,
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let BlockKind::Code {
        rich_text,
        language,
        caption,
    } = &block.kind
    else {
        return String::new();
    };
    let pad = input.pad();
    let content = plain_text(rich_text);
    let fence = CodeFence::fence_for(&content);
    let lang = if *language == input.options.default_code_language {
        ""
    } else {
        language.as_str()
    };

    let mut lines = vec![format!("{pad}{fence}{lang}")];
    if !content.is_empty() {
        lines.extend(content.split('\n').map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{pad}{l}")
            }
        }));
    }
    lines.push(format!("{pad}{fence}"));
    lines.extend(Caption::render(&pad, input.codec, caption));
    input.with_children(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ConverterOptions;
    use crate::rich_text::RichTextCodec;
    use pretty_assertions::assert_eq;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    fn parse_at_start(src: &str) -> Outcome {
        let codec = RichTextCodec::default();
        let options = ConverterOptions::default();
        let ctx = HandlerContext {
            codec: &codec,
            options: &options,
        };
        let ls = lines(src);
        parse(&LineCursor::new(&ls), &ctx).unwrap()
    }

    #[test]
    fn opener_detection() {
        assert_eq!(CodeFence::opener("```rust"), Some((3, "rust")));
        assert_eq!(CodeFence::opener("````"), Some((4, "")));
        assert_eq!(CodeFence::opener("``inline``"), None);
        assert_eq!(CodeFence::opener("```a`b"), None);
    }

    #[test]
    fn closer_needs_the_same_length() {
        assert!(CodeFence::closes("```", 3));
        assert!(CodeFence::closes("  ````", 3));
        assert!(!CodeFence::closes("```", 4));
        assert!(!CodeFence::closes("```rust", 3));
    }

    #[test]
    fn parses_content_language_and_caption() {
        let outcome = parse_at_start("```python\nprint(1)\n\n+++\n```\n[caption] Example");
        assert_eq!(
            outcome,
            Outcome::Leaf {
                block: Block::new(BlockKind::Code {
                    rich_text: vec![RichTextRun::plain("print(1)\n\n+++")],
                    language: "python".into(),
                    caption: vec![RichTextRun::plain("Example")],
                }),
                consumed: 5,
            }
        );
    }

    #[test]
    fn legacy_inline_caption_and_default_language() {
        let outcome = parse_at_start("``` \"Setup\"\nx\n```");
        let Outcome::Leaf { block, consumed } = outcome else {
            panic!("expected leaf");
        };
        assert_eq!(consumed, 2);
        assert_eq!(
            block.kind,
            BlockKind::Code {
                rich_text: vec![RichTextRun::plain("x")],
                language: "plain text".into(),
                caption: vec![RichTextRun::plain("Setup")],
            }
        );
    }

    #[test]
    fn unterminated_fence_takes_the_rest() {
        let Outcome::Leaf { consumed, .. } = parse_at_start("```\na\nb") else {
            panic!("expected leaf");
        };
        assert_eq!(consumed, 2);
    }

    #[test]
    fn fence_grows_past_content_ticks() {
        assert_eq!(CodeFence::fence_for("plain"), "```");
        assert_eq!(CodeFence::fence_for("```\nnested\n```"), "````");
    }
}
