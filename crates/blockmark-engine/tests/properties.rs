use blockmark_engine::{
    Annotations, Block, BlockKind, Color, Media, Mention, MentionKind, RichTextCodec, RichTextRun,
    TextRun, merge_adjacent, normalize_tree, parse, render,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(100)
}

/// Text with every inline delimiter in reach.
const TEXT: &str = r"[a-z0-9 *_~`$\\\[\]()<>@=|#:.!+\n-]{1,10}";
const WORD: &str = "[a-z]{1,6}";

fn url() -> impl Strategy<Value = String> {
    prop_oneof![
        "https://[a-z]{1,8}\\.com/[a-z0-9_]{0,6}",
        r"[a-z0-9/.:()\\`-]{1,12}",
    ]
}

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        4 => Just(Color::Default),
        1 => Just(Color::Red),
        1 => Just(Color::Blue),
        1 => Just(Color::GreenBackground),
        1 => Just(Color::YellowBackground),
    ]
}

fn annotations() -> impl Strategy<Value = Annotations> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        color(),
    )
        .prop_map(
            |(bold, italic, strikethrough, underline, code, color)| Annotations {
                bold,
                italic,
                strikethrough,
                underline,
                code,
                color,
            },
        )
}

fn code_text() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-z0-9 `$*\\<>()|\n]{1,8}",
        r"[a-z\\]{0,2}<br>[a-z`]{0,2}",
    ]
}

fn expression() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-z0-9 +^{}$`\\\n]{1,8}",
        r"[a-z\\]{0,2}<br>[a-z$]{0,2}",
    ]
}

fn styled_run() -> impl Strategy<Value = RichTextRun> {
    (annotations(), prop::option::of(url())).prop_flat_map(|(annotations, link)| {
        let content = if annotations.code {
            code_text().boxed()
        } else {
            TEXT.boxed()
        };
        content.prop_map(move |content| {
            RichTextRun::Text(TextRun {
                content,
                link: link.clone(),
                annotations,
            })
        })
    })
}

fn mention() -> impl Strategy<Value = Mention> {
    prop_oneof![
        (
            prop::sample::select(MentionKind::ALL.to_vec()),
            "[a-z0-9][a-z0-9-]{0,7}"
        )
            .prop_map(|(kind, id)| Mention::new(kind, id)),
        (1u8..=9, prop::option::of(1u8..=9)).prop_map(|(start, end)| Mention::Date {
            start: format!("2024-01-0{start}"),
            end: end.map(|end| format!("2024-01-0{end}")),
        }),
    ]
}

/// A run that is not plain text.
fn inline_run() -> impl Strategy<Value = RichTextRun> {
    prop_oneof![
        4 => styled_run(),
        1 => expression().prop_map(RichTextRun::equation),
        1 => mention().prop_map(RichTextRun::mention),
    ]
}

/// Runs where plain text sits between any two formatted runs.
fn spans() -> impl Strategy<Value = Vec<RichTextRun>> {
    (
        prop::option::of(TEXT),
        vec((inline_run(), TEXT), 0..5),
        any::<bool>(),
    )
        .prop_map(|(lead, pairs, trailing_text)| {
            let mut runs: Vec<RichTextRun> = lead.into_iter().map(RichTextRun::plain).collect();
            let count = pairs.len();
            for (i, (run, text)) in pairs.into_iter().enumerate() {
                runs.push(run);
                if trailing_text || i + 1 < count {
                    runs.push(RichTextRun::plain(text));
                }
            }
            runs
        })
}

/// Block text: opens and closes on a plain word so no line marker or edge
/// whitespace comes from the runs.
fn rich_text() -> impl Strategy<Value = Vec<RichTextRun>> {
    (WORD, vec((inline_run(), TEXT), 0..3), WORD).prop_map(|(first, pairs, last)| {
        let mut runs = vec![RichTextRun::plain(format!("{first} "))];
        for (run, text) in pairs {
            runs.push(run);
            runs.push(RichTextRun::plain(text));
        }
        runs.push(RichTextRun::plain(format!(" {last}")));
        runs
    })
}

fn title() -> impl Strategy<Value = Vec<RichTextRun>> {
    prop_oneof![1 => Just(Vec::new()), 4 => rich_text()]
}

fn code_block() -> impl Strategy<Value = Block> {
    let line = prop_oneof![
        Just(String::new()),
        "[a-z]{1,4}( [a-z0-9(){};=+]{1,4}){0,2}",
        "  [a-z]{1,4}",
    ];
    (
        vec(line, 1..4),
        prop::sample::select(vec!["rust", "python", "plain text"]),
        prop::option::of(rich_text()),
    )
        .prop_map(|(lines, language, caption)| {
            Block::new(BlockKind::Code {
                rich_text: vec![RichTextRun::plain(lines.join("\n"))],
                language: language.to_string(),
                caption: caption.unwrap_or_default(),
            })
        })
}

fn equation_block() -> impl Strategy<Value = Block> {
    vec("[a-z0-9]{1,3}( [+=^] [a-z0-9]{1,3}){0,2}", 1..3).prop_map(|lines| {
        Block::new(BlockKind::Equation {
            expression: lines.join("\n"),
        })
    })
}

fn media_block() -> impl Strategy<Value = Block> {
    (
        0usize..7,
        "https://[a-z]{1,8}\\.com/[a-z0-9]{0,6}",
        prop::option::of(rich_text()),
    )
        .prop_map(|(kind, url, caption)| {
            let mut media = Media::new(url);
            media.caption = caption.unwrap_or_default();
            let kind = match kind {
                0 => BlockKind::Image(media),
                1 => BlockKind::Video(media),
                2 => BlockKind::Audio(media),
                3 => BlockKind::File(media),
                4 => BlockKind::Pdf(media),
                5 => BlockKind::Bookmark(media),
                _ => BlockKind::Embed(media),
            };
            Block::new(kind)
        })
}

fn table_block() -> impl Strategy<Value = Block> {
    (1usize..=3, 1usize..=3, any::<bool>()).prop_flat_map(|(width, height, header)| {
        vec(vec(rich_text(), width), height).prop_map(move |rows| {
            let rows = rows
                .into_iter()
                .map(|cells| Block::new(BlockKind::TableRow { cells }))
                .collect();
            Block::with_children(
                BlockKind::Table {
                    table_width: width,
                    has_column_header: header,
                    has_row_header: false,
                },
                rows,
            )
        })
    })
}

fn leaf_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        4 => rich_text().prop_map(Block::paragraph),
        1 => Just(Block::spacer()),
        1 => (1u8..=3, title())
            .prop_map(|(level, rich_text)| Block::new(BlockKind::Heading { level, rich_text })),
        1 => code_block(),
        1 => equation_block(),
        1 => media_block(),
        2 => table_block(),
        1 => prop_oneof![
            Just(BlockKind::Divider),
            Just(BlockKind::Breadcrumb),
            Just(BlockKind::TableOfContents),
        ]
        .prop_map(Block::new),
        1 => "[a-z0-9-]{1,8}".prop_map(|id| Block::new(BlockKind::SyncedBlock {
            synced_from: Some(id),
        })),
    ]
}

/// Any block except a column list.
fn block() -> impl Strategy<Value = Block> {
    leaf_block().prop_recursive(3, 24, 4, |inner| {
        let children = vec(inner, 0..4);
        let icon = prop::option::of(prop::sample::select(vec!["💡", "⚠️"]));
        prop_oneof![
            3 => (rich_text(), children.clone()).prop_map(|(rich_text, children)| {
                Block::with_children(BlockKind::Paragraph { rich_text }, children)
            }),
            2 => (rich_text(), children.clone()).prop_map(|(rich_text, children)| {
                Block::with_children(BlockKind::BulletedListItem { rich_text }, children)
            }),
            1 => (rich_text(), children.clone()).prop_map(|(rich_text, children)| {
                let kind = BlockKind::NumberedListItem {
                    rich_text,
                    number: None,
                };
                Block::with_children(kind, children)
            }),
            1 => (rich_text(), any::<bool>(), children.clone()).prop_map(
                |(rich_text, checked, children)| {
                    Block::with_children(BlockKind::ToDo { rich_text, checked }, children)
                }
            ),
            1 => (rich_text(), children.clone()).prop_map(|(rich_text, children)| {
                Block::with_children(BlockKind::Quote { rich_text }, children)
            }),
            1 => (rich_text(), icon, children.clone()).prop_map(|(rich_text, icon, children)| {
                let icon = icon.map(str::to_string);
                Block::with_children(BlockKind::Callout { rich_text, icon }, children)
            }),
            2 => (title(), children.clone()).prop_map(|(rich_text, children)| {
                Block::with_children(BlockKind::Toggle { rich_text }, children)
            }),
            1 => (1u8..=3, title(), children.clone()).prop_map(|(level, rich_text, children)| {
                Block::with_children(BlockKind::ToggleableHeading { level, rich_text }, children)
            }),
            1 => children.prop_map(|children| {
                Block::with_children(BlockKind::SyncedBlock { synced_from: None }, children)
            }),
        ]
    })
}

fn column_list() -> impl Strategy<Value = Block> {
    let column = (
        prop_oneof![Just(None), Just(Some(0.5))],
        vec(block(), 0..3),
    )
        .prop_map(|(width_ratio, children)| {
            Block::with_children(BlockKind::Column { width_ratio }, children)
        });
    vec(column, 1..4).prop_map(|columns| Block::with_children(BlockKind::ColumnList, columns))
}

fn document() -> impl Strategy<Value = Vec<Block>> {
    vec(prop_oneof![6 => block(), 1 => column_list()], 0..5)
}

/// Markup built mostly from block and inline delimiters.
const MARKUP: &str = r"([-+#>|*_~`$:=@!\[\]()\\ \tx1.]{0,12}\n?){0,12}";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(cases()))]

    #[test]
    fn spans_survive_the_codec(runs in spans()) {
        let codec = RichTextCodec::default();
        let markup = codec.to_markup(&runs);
        let back = codec.to_spans(&markup);
        prop_assert_eq!(merge_adjacent(&back), merge_adjacent(&runs), "markup: {}", markup);
    }

    #[test]
    fn trees_survive_render_and_parse(tree in document()) {
        let markup = render(&tree);
        let reparsed = parse(&markup);
        prop_assert_eq!(normalize_tree(&reparsed), normalize_tree(&tree), "markup:\n{}", markup);
    }

    #[test]
    fn rendering_a_parsed_tree_is_stable(tree in document()) {
        let once = render(&tree);
        let twice = render(&parse(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn any_text_parses_and_renders(input in "\\PC{0,200}") {
        let tree = parse(&input);
        prop_assert!(tree.iter().all(|block| block.validate().is_ok()));
        render(&tree);
    }

    #[test]
    fn delimiter_soup_parses_and_renders(input in MARKUP) {
        let tree = parse(&input);
        let reparsed = parse(&render(&tree));
        prop_assert!(reparsed.iter().all(|block| block.validate().is_ok()));
    }
}
