//! Word vocabulary selection for the binary text features.
//!
//! Tokens are lower-cased runs of word characters (alphanumeric or `_`) at
//! least two characters long. Each document counts a term at most once, so
//! term frequency equals document frequency. The `max_terms` most frequent
//! terms are kept, ties broken alphabetically, and the retained terms are
//! stored in alphabetical order so column positions are reproducible.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// Prefix given to text feature column names.
pub const TERM_COLUMN_PREFIX: &str = "sentiment_";

/// Retained term with the number of documents it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyTerm {
    pub term: String,
    pub document_frequency: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    terms: Vec<VocabularyTerm>,
}

impl Vocabulary {
    /// Select the top `max_terms` terms across `documents`.
    pub fn fit<'a, I>(documents: I, max_terms: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for document in documents {
            for token in document_terms(document) {
                *frequencies.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = frequencies.into_iter().collect();
        ranked.sort_by(|(term_a, freq_a), (term_b, freq_b)| {
            freq_b.cmp(freq_a).then_with(|| term_a.cmp(term_b))
        });
        ranked.truncate(max_terms);
        ranked.sort_by(|(term_a, _), (term_b, _)| term_a.cmp(term_b));

        Self {
            terms: ranked
                .into_iter()
                .map(|(term, document_frequency)| VocabularyTerm {
                    term,
                    document_frequency,
                })
                .collect(),
        }
    }

    pub fn terms(&self) -> &[VocabularyTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column position of `term` among the text features.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms
            .binary_search_by(|entry| entry.term.as_str().cmp(term))
            .ok()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.terms
            .iter()
            .map(|entry| format!("{TERM_COLUMN_PREFIX}{}", entry.term))
            .collect()
    }

    /// Binary presence vector of this vocabulary's terms in `document`.
    pub fn encode(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.terms.len()];
        for token in document_terms(document) {
            if let Some(idx) = self.index_of(&token) {
                row[idx] = 1.0;
            }
        }
        row
    }
}

/// Split text into lower-cased word tokens of two or more characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn document_terms(document: &str) -> BTreeSet<String> {
    tokenize(document).into_iter().collect()
}
