use crate::model::{Annotations, Color, Mention, MentionKind, RichTextRun, TextRun};

use super::{
    cursor::Cursor,
    kinds::{
        CodeSpan, ColorGroup, Emphasis, Escape, InlineEquation, Link, LineBreak, MentionToken,
        mention::MentionTarget,
    },
    resolver::MentionResolver,
};

/// Formatting inherited from enclosing constructs.
#[derive(Debug, Clone, Default)]
struct Style {
    annotations: Annotations,
    link: Option<String>,
}

impl Style {
    fn with_emphasis(&self, emphasis: Emphasis) -> Style {
        let mut next = self.clone();
        emphasis.apply(&mut next.annotations);
        next
    }

    fn with_color(&self, color: Color) -> Style {
        let mut next = self.clone();
        next.annotations.color = color;
        next
    }

    fn with_link(&self, written: &str) -> Style {
        let mut next = self.clone();
        next.link = Some(Link::unescape_url(written.trim()));
        next
    }

    fn run(&self, content: String, code: bool) -> RichTextRun {
        let mut annotations = self.annotations;
        annotations.code |= code;
        RichTextRun::Text(TextRun {
            content,
            link: self.link.clone(),
            annotations,
        })
    }
}

/// Parses one line of inline markup into rich text runs.
///
/// # Precedence
/// At each position the parser tries, in order: escape, `<br>`, inline
/// equation, mention, code span, background group, foreground group, link,
/// then emphasis. Anything that does not form a complete construct is kept
/// as literal text, so parsing never fails.
pub fn parse_spans(markup: &str, resolver: &dyn MentionResolver) -> Vec<RichTextRun> {
    let mut out = Vec::new();
    parse_into(markup, &Style::default(), resolver, &mut out);
    out
}

fn parse_into(
    s: &str,
    style: &Style,
    resolver: &dyn MentionResolver,
    out: &mut Vec<RichTextRun>,
) {
    let mut cur = Cursor::new(s);
    let mut text = String::new();

    fn flush_text(out: &mut Vec<RichTextRun>, text: &mut String, style: &Style) {
        if !text.is_empty() {
            out.push(style.run(std::mem::take(text), false));
        }
    }

    while !cur.eof() {
        if let Some(c) = try_parse_escape(&mut cur) {
            text.push(c);
            continue;
        }
        if cur.starts_with(LineBreak::TAG.as_bytes()) {
            cur.bump_n(LineBreak::TAG.len());
            text.push('\n');
            continue;
        }
        if let Some(run) = try_parse_equation(&mut cur) {
            flush_text(out, &mut text, style);
            out.push(run);
            continue;
        }
        if let Some(run) = try_parse_mention(&mut cur, resolver) {
            flush_text(out, &mut text, style);
            out.push(run);
            continue;
        }
        if cur.peek() == Some(CodeSpan::TICK) {
            match try_parse_code_span(&mut cur) {
                Some(code) => {
                    flush_text(out, &mut text, style);
                    out.push(style.run(code, true));
                }
                None => {
                    let end = CodeSpan::skip(cur.bytes(), cur.i);
                    text.push_str(cur.slice(cur.i, end));
                    cur.seek(end);
                }
            }
            continue;
        }
        if let Some((color, inner)) = try_parse_color_group(&mut cur) {
            flush_text(out, &mut text, style);
            parse_into(inner, &style.with_color(color), resolver, out);
            continue;
        }
        if let Some((inner, url)) = try_parse_link(&mut cur) {
            flush_text(out, &mut text, style);
            parse_into(inner, &style.with_link(url), resolver, out);
            continue;
        }
        if let Some((emphasis, inner)) = try_parse_emphasis(&mut cur) {
            flush_text(out, &mut text, style);
            parse_into(inner, &style.with_emphasis(emphasis), resolver, out);
            continue;
        }
        if let Some(c) = cur.bump_char() {
            text.push(c);
        }
    }

    flush_text(out, &mut text, style);
}

fn try_parse_escape(cur: &mut Cursor<'_>) -> Option<char> {
    if cur.peek() != Some(Escape::BACKSLASH) {
        return None;
    }
    let next = cur.peek_next().filter(|b| Escape::escapes(*b))?;
    cur.bump_n(2);
    Some(next as char)
}

fn try_parse_equation(cur: &mut Cursor<'_>) -> Option<RichTextRun> {
    let start = cur.i;
    let close = InlineEquation::close(cur.bytes(), start)?;
    let expression = InlineEquation::expression(cur.slice(start + 1, close));
    cur.seek(close + 1);
    Some(RichTextRun::equation(expression))
}

fn try_parse_mention(cur: &mut Cursor<'_>, resolver: &dyn MentionResolver) -> Option<RichTextRun> {
    let (target, content_start, close) = MentionToken::bounds(cur.bytes(), cur.i)?;
    let content = cur.slice(content_start, close).trim();
    cur.seek(close + 1);

    let mention = match target {
        MentionTarget::Date => match content.split_once(MentionToken::RANGE) {
            Some((start, end)) => Mention::Date {
                start: start.trim().to_string(),
                end: Some(end.trim().to_string()),
            },
            None => Mention::Date {
                start: content.to_string(),
                end: None,
            },
        },
        MentionTarget::Reference(kind) => Mention::new(kind, lookup_id(resolver, kind, content)),
    };
    Some(RichTextRun::Mention(mention))
}

/// Maps a written mention back to its id. Unknown names are taken as ids.
fn lookup_id(resolver: &dyn MentionResolver, kind: MentionKind, written: &str) -> String {
    match resolver.resolve_name(kind, written) {
        Ok(Some(id)) => id,
        Ok(None) => written.to_string(),
        Err(e) => {
            log::warn!("Could not look up {} mention '{written}': {e}", kind.as_str());
            written.to_string()
        }
    }
}

fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<String> {
    let (body_start, body_end, end) = CodeSpan::bounds(cur.bytes(), cur.i)?;
    let code = CodeSpan::content(cur.slice(body_start, body_end));
    cur.seek(end);
    Some(code)
}

fn try_parse_color_group<'a>(cur: &mut Cursor<'a>) -> Option<(Color, &'a str)> {
    let start = cur.i;
    if cur.starts_with(ColorGroup::HIGHLIGHT.as_bytes()) {
        let (color, body, close, end) = ColorGroup::background(cur.bytes(), start)?;
        let inner = cur.slice(body, close);
        cur.seek(end);
        return Some((color, inner));
    }
    let (color, body, close) = ColorGroup::foreground(cur.bytes(), start)?;
    let inner = cur.slice(body, close);
    cur.seek(close + 1);
    Some((color, inner))
}

fn try_parse_link<'a>(cur: &mut Cursor<'a>) -> Option<(&'a str, &'a str)> {
    let start = cur.i;
    let (text_close, url_close) = Link::bounds(cur.bytes(), start)?;
    let inner = cur.slice(start + 1, text_close);
    let url = cur.slice(text_close + 2, url_close);
    cur.seek(url_close + 1);
    Some((inner, url))
}

fn try_parse_emphasis<'a>(cur: &mut Cursor<'a>) -> Option<(Emphasis, &'a str)> {
    let start = cur.i;
    let (marker, emphasis) = Emphasis::opener_at(cur.bytes(), start)?;
    let from = start + marker.len();
    let close = emphasis.find_close(marker, cur.bytes(), from)?;
    let inner = cur.slice(from, close);
    cur.seek(close + marker.len());
    Some((emphasis, inner))
}
