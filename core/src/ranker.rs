use std::collections::BTreeMap;

use crate::index::InvertedIndex;
use crate::query::Query;
use crate::{DocId, DocumentStatus, SearchHit, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

/// ln(N / df). `df` is at least 1 for any indexed term.
pub fn inverse_document_frequency(document_count: usize, documents_with_term: usize) -> f64 {
    (document_count as f64 / documents_with_term as f64).ln()
}

/// Score every document matching `query`, keep those accepted by `predicate`
/// and return the best [`MAX_RESULT_DOCUMENT_COUNT`] of them.
pub fn rank<P>(index: &InvertedIndex, query: &Query, predicate: P) -> Vec<SearchHit>
where
    P: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let mut hits = score(index, query, predicate);
    let matched = hits.len();
    sort_hits(&mut hits);
    hits.truncate(MAX_RESULT_DOCUMENT_COUNT);
    tracing::debug!(matched, returned = hits.len(), "ranked documents");
    hits
}

fn score<P>(index: &InvertedIndex, query: &Query, predicate: P) -> Vec<SearchHit>
where
    P: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let n = index.document_count();
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let idf = inverse_document_frequency(n, postings.len());
        for (&id, &tf) in postings {
            *relevance.entry(id).or_insert(0.0) += tf * idf;
        }
    }

    relevance
        .into_iter()
        .filter(|(id, _)| !query.excludes(*id))
        .filter_map(|(id, relevance)| {
            let data = index.document(id)?;
            predicate(id, data.status, data.rating).then_some(SearchHit { id, relevance, rating: data.rating })
        })
        .collect()
}

/// Descending relevance; runs of hits whose neighbouring relevances differ by
/// less than [`RELEVANCE_EPSILON`] are ordered by descending rating.
pub fn sort_hits(hits: &mut [SearchHit]) {
    hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then_with(|| b.rating.cmp(&a.rating)));
    for run in hits.chunk_by_mut(|a, b| (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON) {
        run.sort_by(|a, b| b.rating.cmp(&a.rating));
    }
}
