use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::query::{parse_query, Query};
use crate::ranker::rank;
use crate::tokenizer::StopWords;
use crate::{DocId, DocumentData, DocumentMatch, DocumentStatus, SearchHit};

/// Ingestion, ranked search and match diagnostics over one [`InvertedIndex`].
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    index: InvertedIndex,
}

impl SearchEngine {
    pub fn new(stop_words: StopWords) -> Self {
        Self { index: InvertedIndex::new(stop_words) }
    }

    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(StopWords::new(words)?))
    }

    /// Build from a space-separated stop-word line.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::new(StopWords::from_text(text)?))
    }

    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        self.index.add_document(id, text, status, ratings)
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<SearchHit>> {
        self.find_top_documents_by(raw_query, move |_, doc_status, _| doc_status == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<SearchHit>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        Ok(rank(&self.index, &query, predicate))
    }

    /// Sorted plus-words of `raw_query` found in document `id`, or none if a
    /// minus-word excludes it.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<DocumentMatch> {
        let query = self.parse_query(raw_query)?;
        let status = self.index.document(id).ok_or(Error::UnknownDocument(id))?.status;

        let matched_terms = if query.excludes(id) {
            Vec::new()
        } else {
            query
                .plus_words
                .into_iter()
                .filter(|word| self.index.postings(word).is_some_and(|p| p.contains_key(&id)))
                .collect()
        };
        Ok(DocumentMatch { matched_terms, status })
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<Query> { parse_query(&self.index, raw_query) }

    pub fn document_count(&self) -> usize { self.index.document_count() }

    pub fn document_id(&self, index: usize) -> Result<DocId> { self.index.document_id(index) }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.index.document_ids() }

    pub fn document(&self, id: DocId) -> Result<DocumentData> {
        self.index.document(id).copied().ok_or(Error::UnknownDocument(id))
    }

    pub fn word_frequencies(&self, id: DocId) -> Result<&BTreeMap<String, f64>> {
        self.index.word_frequencies(id).ok_or(Error::UnknownDocument(id))
    }

    pub fn stop_words(&self) -> &StopWords { self.index.stop_words() }

    pub fn index(&self) -> &InvertedIndex { &self.index }
}
