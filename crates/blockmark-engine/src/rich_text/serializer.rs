use crate::model::{Mention, RichTextRun, TextRun, merge_adjacent};

use super::{
    kinds::{CodeSpan, ColorGroup, Emphasis, Escape, InlineEquation, LineBreak, Link, MentionToken},
    resolver::MentionResolver,
};

/// Writes rich text runs as one line of inline markup.
///
/// Consecutive runs sharing a non-default color are wrapped in a single color
/// group. Within a run, emphasis wraps innermost-first (code, strikethrough,
/// italic, underline, bold) and a link wraps everything.
pub fn serialize_spans(runs: &[RichTextRun], resolver: &dyn MentionResolver) -> String {
    let runs = merge_adjacent(runs);
    let visible = runs.iter().any(|run| match run {
        RichTextRun::Text(text) => !text.content.trim().is_empty(),
        _ => true,
    });
    let mut out = String::new();
    let mut after_plain = false;

    for group in runs.chunk_by(|a, b| a.color() == b.color()) {
        let color = group[0].color();
        let in_group = !color.is_default();
        let body: String = group
            .iter()
            .enumerate()
            .map(|(i, run)| {
                let leading = visible && out.is_empty() && i == 0;
                serialize_run(run, in_group, leading, resolver)
            })
            .collect();

        if !in_group {
            out.push_str(&body);
        } else if color.is_background() {
            let highlight = ColorGroup::HIGHLIGHT;
            out.push_str(&format!("{highlight}({}:{body}){highlight}", color.base_name()));
        } else {
            // `==` from plain text would turn the group into a highlight
            if after_plain && out.ends_with(ColorGroup::HIGHLIGHT) {
                out.insert(out.len() - 1, Escape::BACKSLASH as char);
            }
            out.push_str(&format!("({}:{body})", color.base_name()));
        }
        after_plain = !in_group;
    }
    out
}

fn serialize_run(
    run: &RichTextRun,
    in_group: bool,
    leading: bool,
    resolver: &dyn MentionResolver,
) -> String {
    match run {
        RichTextRun::Text(text) => serialize_text(text, in_group, leading),
        RichTextRun::Equation { expression } if expression.is_empty() => String::new(),
        RichTextRun::Equation { expression } => InlineEquation::wrap(expression),
        RichTextRun::Mention(mention) => serialize_mention(mention, resolver),
    }
}

fn serialize_text(text: &TextRun, in_group: bool, leading: bool) -> String {
    if text.content.is_empty() {
        return String::new();
    }
    let ann = &text.annotations;
    let mut s = if ann.code {
        CodeSpan::wrap(&text.content)
    } else {
        let escaped = escape_text(&text.content, in_group);
        if leading && escaped.starts_with([' ', '\t']) {
            format!("{}{escaped}", Escape::BACKSLASH as char)
        } else {
            escaped
        }
    };

    for emphasis in Emphasis::WRAP_ORDER {
        if emphasis.is_set(ann) {
            let marker = emphasis.marker();
            s = format!("{marker}{s}{marker}");
        }
    }

    match text.link.as_deref() {
        Some(url) if !url.is_empty() => format!("[{s}]({})", Link::escape_url(url)),
        _ => s,
    }
}

fn serialize_mention(mention: &Mention, resolver: &dyn MentionResolver) -> String {
    match mention {
        Mention::Date { start, end } => {
            let content = match end {
                Some(end) => format!("{start}{}{end}", MentionToken::RANGE),
                None => start.clone(),
            };
            format!("@{}[{content}]", MentionToken::DATE)
        }
        other => {
            let Some((kind, id)) = other.reference() else {
                return String::new();
            };
            let written = match resolver.resolve(kind, id) {
                Ok(Some(name)) => name,
                Ok(None) => id.to_string(),
                Err(e) => {
                    log::warn!("Could not resolve {} mention '{id}': {e}", kind.as_str());
                    id.to_string()
                }
            };
            format!("@{}[{written}]", kind.as_str())
        }
    }
}

/// Escapes characters that would otherwise be read as inline markup.
///
/// `(` is escaped when it would start a color group, or always inside one,
/// together with `)`. `@` is escaped before a mention kind name. Newlines
/// become `<br>`.
pub fn escape_text(content: &str, in_group: bool) -> String {
    let mut out = String::with_capacity(content.len());
    for (i, c) in content.char_indices() {
        let rest = &content.as_bytes()[i..];
        let escape = match c {
            '\n' => {
                out.push_str(LineBreak::TAG);
                continue;
            }
            c if Escape::ALWAYS.contains(&c) => true,
            '(' => in_group || ColorGroup::token_at(rest, 0).is_some(),
            ')' => in_group,
            '@' => MentionToken::names_kind(&rest[1..]),
            '<' => rest.starts_with(LineBreak::TAG.as_bytes()),
            _ => false,
        };
        if escape {
            out.push(Escape::BACKSLASH as char);
        }
        out.push(c);
    }
    out
}
