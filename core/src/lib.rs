//! In-memory TF-IDF search over short documents with rating and status metadata.
//!
//! ```
//! use search_core::{DocumentStatus, SearchEngine};
//!
//! let mut engine = SearchEngine::with_stop_words(["and", "in"]).unwrap();
//! engine.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
//! engine.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//!
//! let hits = engine.find_top_documents("curly dog").unwrap();
//! assert_eq!(hits[0].id, 2);
//! ```

use serde::{Deserialize, Serialize};

pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod ranker;
pub mod tokenizer;
pub mod tracker;

pub use engine::SearchEngine;
pub use error::{Error, Result};
pub use index::InvertedIndex;
pub use query::Query;
pub use tokenizer::StopWords;
pub use tracker::RequestRateTracker;

pub type DocId = i32;

/// Upper bound on the number of hits returned by any top-K search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevance values closer than this are ordered by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
/// One tick per query; a day of per-minute queries.
pub const DEFAULT_REQUEST_WINDOW: u64 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

/// Positive query terms found in one document, plus that document's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub matched_terms: Vec<String>,
    pub status: DocumentStatus,
}
