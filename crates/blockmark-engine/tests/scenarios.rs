use std::sync::Arc;

use blockmark_engine::{
    Annotations, Block, BlockKind, Color, Converter, Mention, MentionKind, MentionResolver,
    ResolveError, RichTextRun, normalize_tree, parse, render,
};
use pretty_assertions::assert_eq;

fn para(text: &str) -> Block {
    Block::paragraph(vec![RichTextRun::plain(text)])
}

fn toggle(title: &str, children: Vec<Block>) -> Block {
    Block::with_children(
        BlockKind::Toggle {
            rich_text: vec![RichTextRun::plain(title)],
        },
        children,
    )
}

fn numbered(text: &str, number: Option<u32>, children: Vec<Block>) -> Block {
    Block::with_children(
        BlockKind::NumberedListItem {
            rich_text: vec![RichTextRun::plain(text)],
            number,
        },
        children,
    )
}

#[test]
fn nested_toggle_example() {
    let tree = parse("+++ Outer\n  +++ Inner\n  content\n  +++\n+++");
    assert_eq!(tree, vec![toggle("Outer", vec![toggle(
        "Inner",
        vec![para("content")]
    )])]);
}

#[test]
fn numbered_items_are_renumbered_per_level() {
    let tree = vec![
        numbered("a", Some(5), vec![
            numbered("x", Some(3), vec![]),
            numbered("y", None, vec![]),
        ]),
        numbered("b", Some(9), vec![]),
        para("break"),
        numbered("c", Some(2), vec![]),
    ];
    assert_eq!(
        render(&tree),
        "1. a\n  1. x\n  2. y\n\n2. b\n\nbreak\n\n1. c"
    );
}

#[test]
fn toggle_stays_under_its_list_item() {
    let tree = parse("- item\n  +++ T\n    body\n  +++\n- next");
    let item = |text: &str, children| {
        Block::with_children(
            BlockKind::BulletedListItem {
                rich_text: vec![RichTextRun::plain(text)],
            },
            children,
        )
    };
    assert_eq!(tree, vec![
        item("item", vec![toggle("T", vec![para("body")])]),
        item("next", vec![]),
    ]);
}

#[test]
fn same_color_runs_share_a_group() {
    let red = Annotations {
        color: Color::Red,
        ..Annotations::default()
    };
    let red_bold = Annotations { bold: true, ..red };
    let tree = vec![Block::paragraph(vec![
        RichTextRun::styled("a", red),
        RichTextRun::styled("b", red_bold),
        RichTextRun::plain(" c"),
    ])];
    let markup = render(&tree);
    assert_eq!(markup, "(red:a**b**) c");
    assert_eq!(normalize_tree(&parse(&markup)), normalize_tree(&tree));
}

struct Offline;

impl MentionResolver for Offline {
    fn resolve(&self, _: MentionKind, _: &str) -> Result<Option<String>, ResolveError> {
        Err(ResolveError::Unavailable)
    }

    fn resolve_name(&self, _: MentionKind, _: &str) -> Result<Option<String>, ResolveError> {
        Err(ResolveError::Backend("connection refused".into()))
    }
}

#[test]
fn failing_resolver_falls_back_to_ids() {
    let converter = Converter::new().with_resolver(Arc::new(Offline));
    let tree = converter.parse("Ping @user[Ada]");
    assert_eq!(normalize_tree(&tree), vec![Block::paragraph(vec![
        RichTextRun::plain("Ping "),
        RichTextRun::mention(Mention::new(MentionKind::User, "Ada")),
    ])]);
    assert_eq!(converter.render(&tree), "Ping @user[Ada]");
}

#[test]
fn unterminated_containers_are_kept() {
    let tree = parse("+++ Open\n  kept\n::: columns\n  ::: column\n    also kept");
    assert_eq!(tree.len(), 1);
    let toggle = &tree[0];
    assert_eq!(toggle.children[0], para("kept"));
    assert_eq!(toggle.children.len(), 2);
    assert_eq!(toggle.children[1].kind, BlockKind::ColumnList);
}

#[test]
fn table_with_header_and_padding() {
    let tree = parse("| a | b |\n|---|---|\n| 1 |");
    let [table] = tree.as_slice() else {
        panic!("expected one table, got {tree:?}");
    };
    assert_eq!(table.kind, BlockKind::Table {
        table_width: 2,
        has_column_header: true,
        has_row_header: false,
    });
    assert_eq!(table.children.len(), 2);
    assert_eq!(table.validate(), Ok(()));
    assert_eq!(render(&tree), "| a | b |\n|---|---|\n| 1 |  |");
}

#[test]
fn code_containing_fences_gets_a_longer_fence() {
    let tree = vec![Block::new(BlockKind::Code {
        rich_text: vec![RichTextRun::plain("```\ninner\n```")],
        language: "markdown".into(),
        caption: vec![],
    })];
    let markup = render(&tree);
    assert_eq!(markup, "````markdown\n```\ninner\n```\n````");
    assert_eq!(parse(&markup), tree);
}

#[test]
fn blank_line_runs_and_space_markers() {
    let tree = parse("a\n\n\nb\n\n[space]\n\nc");
    assert_eq!(tree, vec![
        para("a"),
        Block::spacer(),
        para("b"),
        Block::spacer(),
        para("c"),
    ]);
    assert_eq!(render(&tree), "a\n\n[space]\n\nb\n\n[space]\n\nc");
}

#[test]
fn claimed_paragraph_text_is_escaped() {
    let texts = ["- dash", "# hash", "12. twelve", "+++", ":::", ">>>", "[caption] x"];
    let tree: Vec<Block> = texts.iter().map(|t| para(t)).collect();
    assert_eq!(normalize_tree(&parse(&render(&tree))), tree);
}

#[test]
fn tree_serializes_as_typed_records() {
    let tree = parse("- [x] done");
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json[0]["type"], "to_do");
    assert_eq!(json[0]["checked"], true);
    assert_eq!(json[0]["rich_text"][0]["type"], "text");

    let back: Vec<Block> = serde_json::from_value(json).unwrap();
    assert_eq!(back, tree);
}
