//! Text analyzers shared by the similarity backends and the classifier vectorizer.

use std::borrow::Cow;

/// Minimum token length (in characters) kept by [`word_tokens`].
pub const MIN_TOKEN_CHARS: usize = 2;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits on non-word characters and keeps tokens of at least two word characters.
pub fn word_tokens(text: &str, lowercase: bool) -> Vec<String> {
    let text: Cow<'_, str> = if lowercase {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    };

    text.split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Contiguous n-grams of `tokens` for every `n` in `min_n..=max_n`, space-joined.
pub fn ngrams(tokens: &[String], (min_n, max_n): (usize, usize)) -> Vec<String> {
    let mut grams = Vec::new();
    for n in min_n.max(1)..=max_n.min(tokens.len()) {
        if n == 1 {
            grams.extend(tokens.iter().cloned());
        } else {
            grams.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
    }
    grams
}

/// Word analyzer: [`word_tokens`] followed by [`ngrams`].
pub fn analyze(text: &str, ngram_range: (usize, usize), lowercase: bool) -> Vec<String> {
    ngrams(&word_tokens(text, lowercase), ngram_range)
}

/// Lower-cased whitespace tokens (unigrams only).
pub fn whitespace_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
