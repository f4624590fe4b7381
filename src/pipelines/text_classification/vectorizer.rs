use std::collections::HashMap;

use super::standardize::standardize;

/// The id used to pad sequences shorter than the output length
pub const PAD_ID: usize = 0;

/// The id assigned to tokens that are not in the vocabulary
pub const OOV_ID: usize = 1;

/// The vocabulary entry for the padding id
pub const PAD_TOKEN: &str = "";

/// The vocabulary entry for the out-of-vocabulary id
pub const OOV_TOKEN: &str = "[UNK]";

/// Maps raw text to fixed-length sequences of vocabulary ids.
///
/// The vocabulary is built once with [`TextVectorizer::adapt`] from training text only, and
/// every input is run through [`standardize`] before it is split on whitespace.
#[derive(Clone, Debug)]
pub struct TextVectorizer {
    /// The maximum number of vocabulary entries, including the pad and OOV entries
    max_tokens: usize,

    /// The exact length of every vectorized sequence
    sequence_length: usize,

    /// Vocabulary entries, indexed by id
    vocabulary: Vec<String>,

    /// Reverse lookup from token to id
    ids: HashMap<String, usize>,
}

impl TextVectorizer {
    /// Create a vectorizer with an empty vocabulary
    pub fn new(max_tokens: usize, sequence_length: usize) -> Self {
        let mut vectorizer = Self {
            max_tokens: max_tokens.max(2),
            sequence_length,
            vocabulary: Vec::new(),
            ids: HashMap::new(),
        };

        vectorizer.set_vocabulary(Vec::new());

        vectorizer
    }

    /// Build the vocabulary from the most frequent tokens in the given texts.
    ///
    /// Tokens are ordered by descending frequency, with ties broken by descending token
    /// text, after the reserved pad and OOV entries. Any previous vocabulary is replaced.
    pub fn adapt<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for token in self.tokenize(text.as_ref()) {
                *counts.entry(token).or_default() += 1;
            }
        }

        // The reserved entries are never counted
        counts.remove(PAD_TOKEN);
        counts.remove(OOV_TOKEN);

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|(a_token, a_count), (b_token, b_count)| {
            b_count.cmp(a_count).then_with(|| b_token.cmp(a_token))
        });

        let tokens = ranked
            .into_iter()
            .take(self.max_tokens.saturating_sub(2))
            .map(|(token, _)| token)
            .collect();

        self.set_vocabulary(tokens);

        log::debug!("Adapted vocabulary with {} entries", self.vocabulary.len());
    }

    fn set_vocabulary(&mut self, tokens: Vec<String>) {
        let mut vocabulary = Vec::with_capacity(tokens.len() + 2);
        vocabulary.push(PAD_TOKEN.to_string());
        vocabulary.push(OOV_TOKEN.to_string());
        vocabulary.extend(tokens);

        self.ids = vocabulary
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id))
            .collect();
        self.vocabulary = vocabulary;
    }

    /// Standardize the text and split it into whitespace-separated tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        standardize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Map the text to exactly `sequence_length` vocabulary ids, truncating or padding
    pub fn vectorize(&self, text: &str) -> Vec<usize> {
        let mut ids: Vec<usize> = standardize(text)
            .split_whitespace()
            .take(self.sequence_length)
            .map(|token| self.id(token))
            .collect();

        ids.resize(self.sequence_length, PAD_ID);

        ids
    }

    /// Look up the id for a single token
    pub fn id(&self, token: &str) -> usize {
        match token {
            PAD_TOKEN => OOV_ID,
            _ => self.ids.get(token).copied().unwrap_or(OOV_ID),
        }
    }

    /// Look up the token for an id
    pub fn token(&self, id: usize) -> Option<&str> {
        self.vocabulary.get(id).map(String::as_str)
    }

    /// The vocabulary, indexed by id
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// The number of entries in the vocabulary, including the reserved entries
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The maximum vocabulary size
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// The length of every vectorized sequence
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn adapted(max_tokens: usize, sequence_length: usize) -> TextVectorizer {
        let mut vectorizer = TextVectorizer::new(max_tokens, sequence_length);

        vectorizer.adapt([
            "The movie was great!",
            "The movie was terrible...",
            "The acting was great<br />the plot was not",
        ]);

        vectorizer
    }

    #[test]
    fn orders_vocabulary_by_frequency() {
        let vectorizer = adapted(100, 8);

        // the: 4, was: 4, movie: 2, great: 2, then singletons; ties by descending token
        assert_eq!(
            vectorizer.vocabulary()[..6],
            ["", "[UNK]", "was", "the", "movie", "great"]
        );
        assert_eq!(
            vectorizer.vocabulary()[6..],
            ["terrible", "plot", "not", "acting"]
        );
    }

    #[test]
    fn caps_the_vocabulary_size() {
        let vectorizer = adapted(4, 8);

        assert_eq!(vectorizer.vocab_size(), 4);
        assert_eq!(vectorizer.vocabulary(), ["", "[UNK]", "was", "the"]);
    }

    #[test]
    fn maps_unknown_tokens_to_oov() {
        let vectorizer = adapted(100, 4);

        assert_eq!(vectorizer.vectorize("The popcorn was great"), vec![3, 1, 2, 5]);
    }

    #[test]
    fn vectorizes_to_a_fixed_length() {
        let vectorizer = adapted(10_000, 250);
        let long = "the movie was great ".repeat(200);

        for text in ["", "great", "The movie was okay.", long.as_str()] {
            assert_eq!(vectorizer.vectorize(text).len(), 250);
        }
    }

    #[test]
    fn pads_and_truncates() {
        let vectorizer = adapted(100, 4);

        assert_eq!(vectorizer.vectorize("great"), vec![5, PAD_ID, PAD_ID, PAD_ID]);
        assert_eq!(
            vectorizer.vectorize("the movie was great the movie"),
            vec![3, 4, 2, 5]
        );
    }

    #[test]
    fn inverts_ids_to_tokens() {
        let vectorizer = adapted(100, 8);

        let ids = vectorizer.vectorize("the acting was not great");
        let tokens: Vec<_> = ids.iter().filter_map(|id| vectorizer.token(*id)).collect();

        assert_eq!(tokens, ["the", "acting", "was", "not", "great", "", "", ""]);
        assert_eq!(vectorizer.token(10_000), None);
    }

    #[test]
    fn everything_is_oov_before_adapting() {
        let vectorizer = TextVectorizer::new(100, 3);

        assert_eq!(vectorizer.vocab_size(), 2);
        assert_eq!(vectorizer.vectorize("hello there"), vec![OOV_ID, OOV_ID, PAD_ID]);
    }
}
