/// Knobs for parsing and rendering. Callers map their own configuration onto this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Spaces per nesting level, in both directions.
    pub indent_width: usize,
    /// Longest text run kept whole when parsing; longer runs are split. `None` disables splitting.
    pub max_text_length: Option<usize>,
    /// Language written for code blocks whose fence names none, and omitted when rendering.
    pub default_code_language: String,
}

impl ConverterOptions {
    pub const DEFAULT_INDENT_WIDTH: usize = 2;
    pub const DEFAULT_MAX_TEXT_LENGTH: usize = 2000;
    pub const DEFAULT_CODE_LANGUAGE: &'static str = "plain text";

    /// Leading whitespace for a nesting level.
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(level * self.indent_width)
    }
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            indent_width: Self::DEFAULT_INDENT_WIDTH,
            max_text_length: Some(Self::DEFAULT_MAX_TEXT_LENGTH),
            default_code_language: Self::DEFAULT_CODE_LANGUAGE.to_string(),
        }
    }
}
