use super::Escape;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them. A span
/// opens with a run of ticks and closes at the next run of the same length.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
    const PAD: u8 = b' ';

    fn run_len(s: &[u8], at: usize) -> usize {
        s.get(at..)
            .map_or(0, |rest| rest.iter().take_while(|&&b| b == Self::TICK).count())
    }

    /// `(body_start, body_end, end)` for a span opening at `open`; `end` is just
    /// past the closing fence.
    pub fn bounds(s: &[u8], open: usize) -> Option<(usize, usize, usize)> {
        let fence = Self::run_len(s, open);
        if fence == 0 {
            return None;
        }
        let body_start = open + fence;
        let mut j = body_start;
        while j < s.len() {
            if s[j] != Self::TICK {
                j += 1;
                continue;
            }
            let run = Self::run_len(s, j);
            if run == fence {
                return Some((body_start, j, j + run));
            }
            j += run;
        }
        None
    }

    /// Index past the span at `open`, or past its tick run when nothing closes it.
    pub fn skip(s: &[u8], open: usize) -> usize {
        match Self::bounds(s, open) {
            Some((_, _, end)) => end,
            None => open + Self::run_len(s, open).max(1),
        }
    }

    /// Writes `content` as a span whose fence is longer than any tick run inside.
    ///
    /// A space pads the body when it starts or ends with a tick, or when it is
    /// already wrapped in spaces; [`CodeSpan::content`] strips exactly one.
    pub fn wrap(content: &str) -> String {
        let body = Escape::encode_raw(content, &[], false);
        let bytes = body.as_bytes();
        let longest = (0..bytes.len())
            .map(|i| Self::run_len(bytes, i))
            .max()
            .unwrap_or(0);
        let fence = (Self::TICK as char).to_string().repeat(longest + 1);
        if Self::needs_pad(bytes) {
            format!("{fence} {body} {fence}")
        } else {
            format!("{fence}{body}{fence}")
        }
    }

    fn needs_pad(body: &[u8]) -> bool {
        let tick_edge = body.first() == Some(&Self::TICK) || body.last() == Some(&Self::TICK);
        tick_edge || Self::is_padded(body)
    }

    fn is_padded(body: &[u8]) -> bool {
        body.len() >= 2
            && body.first() == Some(&Self::PAD)
            && body.last() == Some(&Self::PAD)
            && body.iter().any(|&b| b != Self::PAD)
    }

    /// Code text of a span body located by [`CodeSpan::bounds`].
    pub fn content(body: &str) -> String {
        let inner = if Self::is_padded(body.as_bytes()) {
            &body[1..body.len() - 1]
        } else {
            body
        };
        Escape::decode_raw(inner, &[], false)
    }
}
