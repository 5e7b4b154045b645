//! Turns program text into numbered, comment-stripped token lines.

/// One non-blank source line: its 1-based line number and its tokens with
/// any `#`-comment already stripped.
pub(super) struct Line<'a> {
    pub number: usize,
    pub tokens: Vec<&'a str>,
}

/// Split `text` into [`Line`]s, dropping comments and blank lines entirely.
/// A line is blank once its comment (if any) is removed; it never reaches
/// the parser.
pub(super) fn tokenize(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let tokens: Vec<&str> =
                raw.split_whitespace().take_while(|tok| !tok.starts_with('#')).collect();
            if tokens.is_empty() {
                None
            } else {
                Some(Line { number: i + 1, tokens })
            }
        })
        .collect()
}

/// A line naming exactly one token that ends with `:` is a label definition.
pub(super) fn label_name(line: &Line<'_>) -> Option<&str> {
    if line.tokens.len() == 1 {
        line.tokens[0].strip_suffix(':')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_dropped() {
        let lines = tokenize("set r0 1\n# a whole comment line\n\nhalt # trailing comment\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tokens, vec!["set", "r0", "1"]);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].tokens, vec!["halt"]);
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn label_line_is_recognized() {
        let lines = tokenize("loop:\nhalt\n");
        assert_eq!(label_name(&lines[0]), Some("loop"));
        assert_eq!(label_name(&lines[1]), None);
    }
}
