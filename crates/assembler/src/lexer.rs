//! Tokenizer for IPPcode24 source lines.

/// A single token from a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// The `.IPPcode24` header, in any letter case.
    Header,
    /// Any other whitespace-separated word.
    Word(&'a str),
}

const HEADER: &str = ".IPPcode24";

/// Tokenize a single line.
///
/// Returns an empty Vec for blank lines and comment-only lines. Comments
/// start with `#` and extend to end of line.
pub(crate) fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    line.split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case(HEADER) {
                Token::Header
            } else {
                Token::Word(word)
            }
        })
        .collect()
}
