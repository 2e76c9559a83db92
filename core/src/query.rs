use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use crate::tokenizer::{ensure_valid, split_into_words};
use crate::DocId;

/// A parsed query. Minus-words are resolved against the index at parse time,
/// so only the ids they excluded are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub excluded_ids: BTreeSet<DocId>,
}

impl Query {
    pub fn excludes(&self, id: DocId) -> bool { self.excluded_ids.contains(&id) }
}

/// Parse `raw` against the current contents of `index`.
///
/// A minus-word that is itself a stop word is dropped before exclusion is
/// resolved, so it excludes nothing.
pub fn parse_query(index: &InvertedIndex, raw: &str) -> Result<Query> {
    ensure_valid(raw)?;
    let stop_words = index.stop_words();
    let mut query = Query::default();

    for word in split_into_words(raw) {
        match word.strip_prefix('-') {
            Some("") => return Err(Error::MalformedQuery(format!("minus with no term in {raw:?}"))),
            Some(rest) if rest.starts_with('-') => {
                return Err(Error::MalformedQuery(format!("double minus in {word:?}")))
            }
            Some(minus) => {
                if stop_words.contains(minus) {
                    continue;
                }
                if let Some(postings) = index.postings(minus) {
                    query.excluded_ids.extend(postings.keys().copied());
                }
            }
            None => {
                if !stop_words.contains(word) {
                    query.plus_words.insert(word.to_string());
                }
            }
        }
    }

    tracing::debug!(plus = query.plus_words.len(), excluded = query.excluded_ids.len(), "parsed query");
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentStatus, StopWords};

    fn index() -> InvertedIndex {
        let mut idx = InvertedIndex::new(StopWords::from_text("in the").unwrap());
        idx.add_document(1, "cat in the city", DocumentStatus::Actual, &[1]).unwrap();
        idx.add_document(2, "dog in the park", DocumentStatus::Actual, &[2]).unwrap();
        idx.add_document(3, "cat and dog", DocumentStatus::Actual, &[3]).unwrap();
        idx
    }

    #[test]
    fn splits_plus_and_minus_words() {
        let q = parse_query(&index(), "cat  cat city -dog -bird").unwrap();
        assert_eq!(q.plus_words, BTreeSet::from(["cat".to_string(), "city".to_string()]));
        assert_eq!(q.excluded_ids, BTreeSet::from([2, 3]));
    }

    #[test]
    fn parsing_is_order_independent() {
        let idx = index();
        assert_eq!(parse_query(&idx, "a -dog c").unwrap(), parse_query(&idx, "c a -dog").unwrap());
        assert_eq!(parse_query(&idx, "a -dog c").unwrap(), parse_query(&idx, "a -dog c").unwrap());
    }

    #[test]
    fn stop_words_are_ignored_on_both_sides() {
        let q = parse_query(&index(), "the cat -in").unwrap();
        assert_eq!(q.plus_words, BTreeSet::from(["cat".to_string()]));
        assert!(q.excluded_ids.is_empty());
    }

    #[test]
    fn rejects_malformed_minus() {
        let idx = index();
        assert!(matches!(parse_query(&idx, "cat -"), Err(Error::MalformedQuery(_))));
        assert!(matches!(parse_query(&idx, "--dog"), Err(Error::MalformedQuery(_))));
        assert!(matches!(parse_query(&idx, "---"), Err(Error::MalformedQuery(_))));
        assert!(matches!(parse_query(&idx, "cat\u{7}"), Err(Error::InvalidCharacter(_))));
    }

    #[test]
    fn inner_hyphens_are_plain_words() {
        let q = parse_query(&index(), "well-known cat-").unwrap();
        assert_eq!(q.plus_words, BTreeSet::from(["cat-".to_string(), "well-known".to_string()]));
    }
}
