use std::sync::Arc;

use crate::blocks::registry::HandlerContext;
use crate::model::Block;
use crate::options::ConverterOptions;
use crate::parsing::{LineParser, postprocess, preprocess};
use crate::render::TreeRenderer;
use crate::rich_text::{MentionResolver, RichTextCodec};

/// Bidirectional converter between markup and block trees.
///
/// Both directions are total: any input string parses to some tree, and any
/// well-formed tree renders to markup.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    codec: RichTextCodec,
    options: ConverterOptions,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            codec: RichTextCodec::default(),
            options,
        }
    }

    /// Uses `resolver` for mention names in both directions.
    pub fn with_resolver(mut self, resolver: Arc<dyn MentionResolver>) -> Self {
        self.codec = RichTextCodec::new(resolver);
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn codec(&self) -> &RichTextCodec {
        &self.codec
    }

    /// Parses markup into top-level blocks.
    pub fn parse(&self, markup: &str) -> Vec<Block> {
        let lines = preprocess::normalize(markup, self.options.indent_width);
        let parser = LineParser::new(HandlerContext {
            codec: &self.codec,
            options: &self.options,
        });
        let mut blocks = parser.parse_lines(&lines);
        if let Some(max) = self.options.max_text_length {
            postprocess::split_long_runs(&mut blocks, max);
        }
        blocks
    }

    /// Renders blocks to markup.
    ///
    /// # Panics
    ///
    /// If the tree breaks a container invariant (see [`Block::validate`]).
    pub fn render(&self, blocks: &[Block]) -> String {
        TreeRenderer::new(&self.codec, &self.options).render(blocks)
    }
}

/// Parses with default options and no mention resolver.
pub fn parse(markup: &str) -> Vec<Block> {
    Converter::default().parse(markup)
}

/// Renders with default options and no mention resolver.
pub fn render(blocks: &[Block]) -> String {
    Converter::default().render(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, MentionKind, RichTextRun};
    use crate::rich_text::StaticResolver;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_is_empty_tree() {
        assert!(parse("").is_empty());
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn long_text_is_split_on_parse() {
        let converter = Converter::with_options(ConverterOptions {
            max_text_length: Some(4),
            ..ConverterOptions::default()
        });
        let blocks = converter.parse("abcdefghij");
        let BlockKind::Paragraph { rich_text } = &blocks[0].kind else {
            panic!("expected paragraph");
        };
        assert_eq!(rich_text.len(), 3);
        assert_eq!(converter.render(&blocks), "abcdefghij");
    }

    #[test]
    fn resolver_names_mentions() {
        let converter = Converter::new().with_resolver(Arc::new(
            StaticResolver::new().with(MentionKind::Page, "p-1", "Roadmap"),
        ));
        let blocks = converter.parse("See @page[Roadmap]");
        assert_eq!(converter.render(&blocks), "See @page[Roadmap]");
        assert_eq!(
            blocks[0].kind.rich_text().map(|r| r.len()),
            Some(2),
            "text run and mention"
        );
        assert_eq!(
            blocks[0].kind.rich_text().and_then(|r| r.first()),
            Some(&RichTextRun::plain("See "))
        );
    }
}
