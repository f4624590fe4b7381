use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// HTML line breaks as they appear in the IMDB reviews
    static ref LINE_BREAK: Regex = Regex::new("<br />").unwrap();

    /// The ASCII punctuation class, equivalent to ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``
    static ref PUNCTUATION: Regex = Regex::new("[[:punct:]]").unwrap();
}

/// Standardize raw review text before it is split into tokens.
///
/// Lowercases ASCII letters, replaces `<br />` line breaks with a space, and removes every
/// ASCII punctuation character. Surrounding whitespace is trimmed. The vectorizer uses this
/// for vocabulary building and for every input it vectorizes afterwards.
pub fn standardize(text: &str) -> String {
    let lowered = text.to_ascii_lowercase();
    let without_breaks = LINE_BREAK.replace_all(&lowered, " ");
    let stripped = PUNCTUATION.replace_all(&without_breaks, "");

    stripped.trim().to_string()
}
