use std::sync::OnceLock;

use regex::Regex;

use super::caption::Caption;
use crate::blocks::registry::{BlockHandler, ChildLayout, HandlerContext, Outcome, RenderInput};
use crate::model::{Block, BlockKind, Media};
use crate::parsing::cursor::LineCursor;

/// `[image](url)`-style media lines and the `![alt](url)` image shorthand.
pub struct MediaLine;

impl MediaLine {
    pub const KINDS: [&'static str; 7] =
        ["image", "video", "audio", "file", "pdf", "bookmark", "embed"];

    fn pattern() -> &'static Regex {
        static MEDIA_REGEX: OnceLock<Regex> = OnceLock::new();
        MEDIA_REGEX.get_or_init(|| {
            Regex::new(r"(?i)^\[(image|video|audio|file|pdf|bookmark|embed)\]\((.+)\)$")
                .expect("Invalid media regex")
        })
    }

    fn image_pattern() -> &'static Regex {
        static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
        IMAGE_REGEX
            .get_or_init(|| Regex::new(r"^!\[(.*?)\]\((.+)\)$").expect("Invalid image regex"))
    }

    fn is_web(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Block kind for a media keyword. Bookmarks and embeds need a web url.
    pub fn kind(name: &str, media: Media) -> Option<BlockKind> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "image" => BlockKind::Image(media),
            "video" => BlockKind::Video(media),
            "audio" => BlockKind::Audio(media),
            "file" => BlockKind::File(media),
            "pdf" => BlockKind::Pdf(media),
            "bookmark" if Self::is_web(&media.url) => BlockKind::Bookmark(media),
            "embed" if Self::is_web(&media.url) => BlockKind::Embed(media),
            _ => return None,
        };
        Some(kind)
    }
}

pub const HANDLER: BlockHandler = BlockHandler {
    name: "media",
    layout: ChildLayout::None,
    can_parse: |cursor| {
        let line = cursor.current().trim();
        MediaLine::pattern().is_match(line) || MediaLine::image_pattern().is_match(line)
    },
    parse,
    can_render: |block| block.kind.media().is_some(),
    render,
};

fn parse(cursor: &LineCursor<'_>, ctx: &HandlerContext<'_>) -> Option<Outcome> {
    let line = cursor.current().trim();
    let (name, mut media) = if let Some(caps) = MediaLine::pattern().captures(line) {
        (caps[1].to_string(), Media::new(caps[2].trim()))
    } else {
        let caps = MediaLine::image_pattern().captures(line)?;
        let mut media = Media::new(caps[2].trim());
        media.caption = ctx.codec.to_spans(caps[1].trim());
        ("image".to_string(), media)
    };

    let caption = cursor.peek(1).and_then(Caption::parse);
    if let Some(markup) = caption {
        media.caption = ctx.codec.to_spans(markup);
    }

    Some(Outcome::Leaf {
        block: Block::new(MediaLine::kind(&name, media)?),
        consumed: usize::from(caption.is_some()),
    })
}

fn render(block: &Block, input: &RenderInput<'_>) -> String {
    let Some(media) = block.kind.media() else {
        return String::new();
    };
    let pad = input.pad();
    let mut own = format!("{pad}[{}]({})", block.kind.name(), media.url);
    if let Some(caption) = Caption::render(&pad, input.codec, &media.caption) {
        own.push('\n');
        own.push_str(&caption);
    }
    input.with_children(own)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RichTextRun;
    use crate::options::ConverterOptions;
    use crate::rich_text::RichTextCodec;
    use pretty_assertions::assert_eq;

    fn parse_lines(src: &[&str]) -> Option<Outcome> {
        let lines: Vec<String> = src.iter().map(|s| s.to_string()).collect();
        let codec = RichTextCodec::default();
        let options = ConverterOptions::default();
        let ctx = HandlerContext {
            codec: &codec,
            options: &options,
        };
        parse(&LineCursor::new(&lines), &ctx)
    }

    #[test]
    fn media_line_with_caption() {
        let outcome = parse_lines(&["[video](https://v.example/1)", "[caption] Launch"]);
        let mut media = Media::new("https://v.example/1");
        media.caption = vec![RichTextRun::plain("Launch")];
        assert_eq!(
            outcome,
            Some(Outcome::Leaf {
                block: Block::new(BlockKind::Video(media)),
                consumed: 1,
            })
        );
    }

    #[test]
    fn alt_text_becomes_caption() {
        let outcome = parse_lines(&["![A cat](cat.png)"]);
        let mut media = Media::new("cat.png");
        media.caption = vec![RichTextRun::plain("A cat")];
        assert_eq!(
            outcome,
            Some(Outcome::Leaf {
                block: Block::new(BlockKind::Image(media)),
                consumed: 0,
            })
        );
    }

    #[test]
    fn bookmark_requires_web_url() {
        assert_eq!(parse_lines(&["[bookmark](notes.txt)"]), None);
        assert!(parse_lines(&["[Bookmark](https://example.com)"]).is_some());
    }
}
