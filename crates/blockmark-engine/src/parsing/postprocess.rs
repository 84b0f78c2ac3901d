use crate::model::{Block, RichTextRun, TextRun};

/// Splits text runs longer than `max` characters into consecutive runs with
/// the same annotations and link, through the whole tree.
pub fn split_long_runs(blocks: &mut [Block], max: usize) {
    if max == 0 {
        return;
    }
    for block in blocks {
        for field in block.kind.rich_text_fields_mut() {
            if field.iter().any(|run| is_long(run, max)) {
                *field = split_runs(field, max);
            }
        }
        split_long_runs(&mut block.children, max);
    }
}

fn is_long(run: &RichTextRun, max: usize) -> bool {
    matches!(run, RichTextRun::Text(text) if text.content.chars().count() > max)
}

fn split_runs(runs: &[RichTextRun], max: usize) -> Vec<RichTextRun> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        match run {
            RichTextRun::Text(text) if is_long(run, max) => {
                let chars: Vec<char> = text.content.chars().collect();
                out.extend(chars.chunks(max).map(|chunk| {
                    RichTextRun::Text(TextRun {
                        content: chunk.iter().collect(),
                        ..text.clone()
                    })
                }));
            }
            other => out.push(other.clone()),
        }
    }
    out
}
