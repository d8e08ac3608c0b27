//! Lexical analysis for command lines.
//!
//! Words are separated by runs of spaces, tabs and newlines. There is no quoting,
//! so `"a b"` yields the two words `"a` and `b"`.

/// Characters that separate words.
pub const WORD_SEPARATORS: [char; 3] = [' ', '\t', '\n'];

/// Splits `line` into its non-empty words, in order.
///
/// An empty or all-whitespace line yields an empty vector.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(WORD_SEPARATORS)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
