use super::cursor::{indent_of, is_blank};

/// Removes the common leading indentation of the non-blank lines.
///
/// Whitespace-only lines lose at most that much, so blank lines inside code
/// keep any surplus.
pub fn dedent(lines: &[String]) -> Vec<String> {
    let common = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| l[indent_of(l).min(common)..].to_string())
        .collect()
}

/// Number of leading `lines` that belong under a line indented by `base`:
/// every line indented deeper, plus blank lines followed by a deeper line.
pub fn indented_span(lines: &[String], base: usize) -> usize {
    let mut span = 0;
    for (i, line) in lines.iter().enumerate() {
        if is_blank(line) {
            continue;
        }
        if indent_of(line) <= base {
            break;
        }
        span = i + 1;
    }
    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedent_strips_common_indent() {
        assert_eq!(
            dedent(&lines(&["    a", "      b", "", "    c"])),
            lines(&["a", "  b", "", "c"])
        );
    }

    #[test]
    fn dedent_of_nothing_is_nothing() {
        assert!(dedent(&[]).is_empty());
    }

    #[test]
    fn span_includes_inner_blanks_only() {
        let ls = lines(&["  a", "", "  b", "", "c", "  d"]);
        assert_eq!(indented_span(&ls, 0), 3);
        assert_eq!(indented_span(&lines(&["x"]), 0), 0);
        assert_eq!(indented_span(&lines(&["", "", "  y"]), 0), 3);
    }
}
