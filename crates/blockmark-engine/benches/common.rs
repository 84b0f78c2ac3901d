/// Markup with every block family, repeated `sections` times.
pub fn generate_markup(sections: usize) -> String {
    let mut out = String::new();
    for i in 0..sections {
        out.push_str(&format!(
            "## Section {i}\n\n\
             Text with **bold**, (blue:color) and a [link](https://example.com/{i}).\n\n\
             - item {i}\n  - nested\n- [ ] task\n\n\
             1. first\n2. second\n\n\
             +++ Toggle {i}\n  hidden ~~text~~\n  ::: columns\n    ::: column\n      left\n    :::\n    ::: column\n      right\n    :::\n  :::\n+++\n\n\
             | a | b |\n|---|---|\n| {i} | `x` |\n\n\
             ```rust\nlet n = {i};\n```\n\n\
             [image](https://example.com/{i}.png)\n[caption] Figure {i}\n\n"
        ));
    }
    out
}
