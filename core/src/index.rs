use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::tokenizer::{ensure_valid, StopWords};
use crate::{DocId, DocumentData, DocumentStatus};

/// Term → document → normalized term frequency, plus per-document metadata.
///
/// Documents are only ever added. The document count used for IDF is the
/// length of the insertion-ordered id list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvertedIndex {
    stop_words: StopWords,
    postings: BTreeMap<String, BTreeMap<DocId, f64>>,
    doc_terms: BTreeMap<DocId, BTreeMap<String, f64>>,
    docs: BTreeMap<DocId, DocumentData>,
    doc_ids: Vec<DocId>,
}

impl InvertedIndex {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    /// Validate and index one document. On error nothing is modified.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(Error::InvalidDocumentId(id));
        }
        if self.docs.contains_key(&id) {
            return Err(Error::DuplicateDocumentId(id));
        }
        ensure_valid(text)?;

        let words = self.stop_words.filter(text);
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in &words {
            *counts.entry(word).or_insert(0) += 1;
        }

        let total = words.len() as f64;
        let mut frequencies = BTreeMap::new();
        for (word, count) in counts {
            let tf = count as f64 / total;
            *self.postings.entry(word.to_string()).or_default().entry(id).or_insert(0.0) += tf;
            frequencies.insert(word.to_string(), tf);
        }

        let rating = average_rating(ratings);
        tracing::debug!(id, rating, ?status, terms = frequencies.len(), "indexed document");
        self.doc_terms.insert(id, frequencies);
        self.docs.insert(id, DocumentData { rating, status });
        self.doc_ids.push(id);
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.doc_ids.len() }

    /// Id of the `index`-th document in insertion order.
    pub fn document_id(&self, index: usize) -> Result<DocId> {
        self.doc_ids
            .get(index)
            .copied()
            .ok_or(Error::OutOfRange { index, count: self.doc_ids.len() })
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.doc_ids.iter().copied() }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> { self.docs.get(&id) }

    /// Documents containing `term`, with their term frequency.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, f64>> { self.postings.get(term) }

    /// Term frequencies of one document; empty when it had no indexable words.
    pub fn word_frequencies(&self, id: DocId) -> Option<&BTreeMap<String, f64>> { self.doc_terms.get(&id) }

    pub fn term_count(&self) -> usize { self.postings.len() }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }
}

/// Integer mean truncated toward zero, 0 for no ratings.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
