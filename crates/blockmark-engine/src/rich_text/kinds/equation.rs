use super::Escape;

/// Inline equation `$expression$`. The expression is a raw zone.
pub struct InlineEquation;

impl InlineEquation {
    pub const DOLLAR: u8 = b'$';
    const GUARDED: &'static [char] = &['$'];

    /// Byte index of the closing dollar for an equation opening at `open`.
    ///
    /// A backslash skips the byte after it, so `\$` stays inside the expression.
    /// Empty expressions and `$$` are not inline equations.
    pub fn close(s: &[u8], open: usize) -> Option<usize> {
        if s.get(open) != Some(&Self::DOLLAR) || s.get(open + 1) == Some(&Self::DOLLAR) {
            return None;
        }
        let mut j = open + 1;
        while j < s.len() {
            match s[j] {
                b'\\' => j += 2,
                b'\n' => return None,
                Self::DOLLAR if j > open + 1 => return Some(j),
                Self::DOLLAR => return None,
                _ => j += 1,
            }
        }
        None
    }

    /// Writes `expression` between dollars. Backslashes are kept as written
    /// except before `$`, `<br>`, a newline or the closing dollar.
    pub fn wrap(expression: &str) -> String {
        let dollar = Self::DOLLAR as char;
        let body = Escape::encode_raw(expression, Self::GUARDED, true);
        format!("{dollar}{body}{dollar}")
    }

    /// Expression text of the body between the dollars.
    pub fn expression(body: &str) -> String {
        Escape::decode_raw(body, Self::GUARDED, true)
    }
}
