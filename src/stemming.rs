//! Keyword stemming
//!
//! Keywords are matched against each document's stemmed keyword set, so the
//! same analyzer must be applied to query terms as was applied when the
//! corpus was built.

use tantivy::tokenizer::{
    Language, LowerCaser, RawTokenizer, Stemmer as SnowballFilter, TextAnalyzer, TokenStream,
};

/// Reduces a word to its root form
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// English Snowball stemmer backed by tantivy's token filters
#[derive(Clone)]
pub struct SnowballStemmer {
    analyzer: TextAnalyzer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self::new(Language::English)
    }

    pub fn new(language: Language) -> Self {
        // RawTokenizer keeps the whole word as one token
        let analyzer = TextAnalyzer::builder(RawTokenizer::default())
            .filter(LowerCaser)
            .filter(SnowballFilter::new(language))
            .build();
        Self { analyzer }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(word);
        let mut stemmed = String::new();
        while stream.advance() {
            stemmed.push_str(&stream.token().text);
        }
        stemmed
    }
}

/// Leaves words untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}
