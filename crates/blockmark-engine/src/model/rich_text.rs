use serde::{Deserialize, Serialize};

/// Closed set of color tokens a text run may carry.
///
/// `Default` carries no visible wrapper when serialized. Every base color has a
/// `*_background` twin that is written with the background delimiter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

impl Color {
    const BASE: [(Color, Color, &'static str); 9] = [
        (Color::Gray, Color::GrayBackground, "gray"),
        (Color::Brown, Color::BrownBackground, "brown"),
        (Color::Orange, Color::OrangeBackground, "orange"),
        (Color::Yellow, Color::YellowBackground, "yellow"),
        (Color::Green, Color::GreenBackground, "green"),
        (Color::Blue, Color::BlueBackground, "blue"),
        (Color::Purple, Color::PurpleBackground, "purple"),
        (Color::Pink, Color::PinkBackground, "pink"),
        (Color::Red, Color::RedBackground, "red"),
    ];

    /// Looks up a color by its token (`red`, `red_background`, ...), case-insensitively.
    pub fn from_name(name: &str) -> Option<Color> {
        let lower = name.to_ascii_lowercase();
        if lower == "default" {
            return Some(Color::Default);
        }
        if let Some(base) = lower.strip_suffix("_background") {
            return Self::BASE
                .iter()
                .find(|(_, _, n)| *n == base)
                .map(|(_, bg, _)| *bg);
        }
        Self::BASE
            .iter()
            .find(|(_, _, n)| *n == lower)
            .map(|(fg, _, _)| *fg)
    }

    /// The base color token without any `_background` suffix.
    pub fn base_name(self) -> &'static str {
        Self::BASE
            .iter()
            .find(|(fg, bg, _)| *fg == self || *bg == self)
            .map(|(_, _, n)| *n)
            .unwrap_or("default")
    }

    pub fn is_background(self) -> bool {
        Self::BASE.iter().any(|(_, bg, _)| *bg == self)
    }

    pub fn is_default(self) -> bool {
        self == Color::Default
    }

    /// The background twin of a foreground color. Background colors map to themselves.
    pub fn to_background(self) -> Color {
        Self::BASE
            .iter()
            .find(|(fg, bg, _)| *fg == self || *bg == self)
            .map(|(_, bg, _)| *bg)
            .unwrap_or(Color::Default)
    }
}

/// Character-level formatting of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub fn is_plain(&self) -> bool {
        *self == Annotations::default()
    }
}

/// A plain or linked text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Annotations::is_plain")]
    pub annotations: Annotations,
}

/// Mention kinds whose display names come from the external resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionKind {
    Page,
    Database,
    User,
}

impl MentionKind {
    pub const ALL: [MentionKind; 3] = [MentionKind::Page, MentionKind::Database, MentionKind::User];

    pub fn as_str(self) -> &'static str {
        match self {
            MentionKind::Page => "page",
            MentionKind::Database => "database",
            MentionKind::User => "user",
        }
    }

    pub fn from_name(name: &str) -> Option<MentionKind> {
        MentionKind::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// A typed reference embedded in text.
///
/// Page, database and user mentions are identified by an opaque id. Display
/// names are looked up through a resolver when the mention is written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mention {
    Page {
        id: String,
    },
    Database {
        id: String,
    },
    User {
        id: String,
    },
    Date {
        start: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
}

impl Mention {
    pub fn new(kind: MentionKind, id: impl Into<String>) -> Self {
        let id = id.into();
        match kind {
            MentionKind::Page => Mention::Page { id },
            MentionKind::Database => Mention::Database { id },
            MentionKind::User => Mention::User { id },
        }
    }

    /// Kind and id for resolvable mentions; `None` for dates.
    pub fn reference(&self) -> Option<(MentionKind, &str)> {
        match self {
            Mention::Page { id } => Some((MentionKind::Page, id)),
            Mention::Database { id } => Some((MentionKind::Database, id)),
            Mention::User { id } => Some((MentionKind::User, id)),
            Mention::Date { .. } => None,
        }
    }
}

/// One inline unit of a block's textual content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextRun {
    Text(TextRun),
    Equation { expression: String },
    Mention(Mention),
}

impl RichTextRun {
    pub fn plain(content: impl Into<String>) -> Self {
        Self::styled(content, Annotations::default())
    }

    pub fn styled(content: impl Into<String>, annotations: Annotations) -> Self {
        RichTextRun::Text(TextRun {
            content: content.into(),
            link: None,
            annotations,
        })
    }

    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        RichTextRun::Text(TextRun {
            content: content.into(),
            link: Some(url.into()),
            annotations: Annotations::default(),
        })
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        RichTextRun::Equation {
            expression: expression.into(),
        }
    }

    pub fn mention(mention: Mention) -> Self {
        RichTextRun::Mention(mention)
    }

    /// Color used when grouping runs under a shared color wrapper.
    pub fn color(&self) -> Color {
        match self {
            RichTextRun::Text(t) => t.annotations.color,
            _ => Color::Default,
        }
    }

    /// Readable text of the run, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            RichTextRun::Text(t) => t.content.clone(),
            RichTextRun::Equation { expression } => expression.clone(),
            RichTextRun::Mention(m) => match m {
                Mention::Date { start, end: None } => start.clone(),
                Mention::Date {
                    start,
                    end: Some(end),
                } => format!("{start}–{end}"),
                Mention::Page { id } | Mention::Database { id } | Mention::User { id } => {
                    id.clone()
                }
            },
        }
    }
}

/// Concatenates the readable text of every run.
pub fn plain_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(RichTextRun::plain_text).collect()
}

/// Merges adjacent text runs that share annotations and link, and drops empty
/// text runs and empty equations. An empty link target counts as no link.
///
/// Two run lists that differ only in how identical formatting was split are
/// equal after merging.
pub fn merge_adjacent(runs: &[RichTextRun]) -> Vec<RichTextRun> {
    let mut out: Vec<RichTextRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match run {
            RichTextRun::Text(t) if t.content.is_empty() => continue,
            RichTextRun::Equation { expression } if expression.is_empty() => continue,
            RichTextRun::Text(t) => {
                let link = t.link.clone().filter(|url| !url.is_empty());
                if let Some(RichTextRun::Text(prev)) = out.last_mut()
                    && prev.annotations == t.annotations
                    && prev.link == link
                {
                    prev.content.push_str(&t.content);
                    continue;
                }
                out.push(RichTextRun::Text(TextRun {
                    link,
                    ..t.clone()
                }));
            }
            other => out.push(other.clone()),
        }
    }
    out
}
