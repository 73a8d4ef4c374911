//! Text tokenization for query terms and record fields.

/// Tokens must be longer than this to be kept.
const MIN_TOKEN_LENGTH: usize = 2;

/// Common English stop words to filter out of queries.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with",
];

/// Returns true for the characters that make up a word: ASCII letters, digits and `_`.
/// Everything else, including non-ASCII letters, acts as a separator.
const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lower-cases `text`, then splits it on every non-word character, dropping
/// tokens shorter than [`MIN_TOKEN_LENGTH`].
fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|word| word.len() >= MIN_TOKEN_LENGTH)
        .map(str::to_string)
        .collect()
}

/// Tokenizes a search query.
///
/// Order and duplicates are preserved; stop words and single characters are dropped:
/// - "The Wireless Headphones" → ["wireless", "headphones"]
/// - "USB-C cable, 2m" → ["usb", "cable", "2m"]
pub fn tokenize(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// Tokenizes record field text. Same splitting as [`tokenize`], but stop words are kept
/// so that field-side matching sees every word of the field.
pub(crate) fn field_tokens(text: &str) -> Vec<String> {
    words(text)
}
