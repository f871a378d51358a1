//! Line-oriented tokenizing shared by the config reader and the scene directive scanner.

/// Split a line into whitespace separated tokens, dropping everything from a `#` token on.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .take_while(|token| !token.starts_with('#'))
        .collect()
}

/// Every line of `text` that has tokens, paired with its 1-based line number.
pub fn directives<'a>(text: &'a str) -> impl Iterator<Item = (usize, Vec<&'a str>)> + 'a {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, tokenize(line)))
        .filter(|(_, tokens)| !tokens.is_empty())
}

/// Parse the first `count` tokens as numbers. Extra tokens are ignored.
pub fn numbers(tokens: &[&str], count: usize) -> Option<Vec<f64>> {
    if tokens.len() < count {
        return None;
    }

    tokens[..count].iter().map(|t| t.parse().ok()).collect()
}
