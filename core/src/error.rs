//! Error types for the search core

use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Document ids must be non-negative
    #[error("invalid document id: {0}")]
    InvalidDocumentId(DocId),

    #[error("document {0} has already been added")]
    DuplicateDocumentId(DocId),

    /// Control character (code point below 0x20) in a document, query or stop word
    #[error("invalid character in {0:?}")]
    InvalidCharacter(String),

    #[error("malformed query: {0}")]
    MalformedQuery(String),

    #[error("document index {index} out of range (document count {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("unknown document: {0}")]
    UnknownDocument(DocId),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::DuplicateDocumentId(3).to_string(), "document 3 has already been added");
        assert_eq!(
            Error::OutOfRange { index: 4, count: 2 }.to_string(),
            "document index 4 out of range (document count 2)"
        );
        assert_eq!(Error::MalformedQuery("double minus in \"--x\"".into()).to_string(), "malformed query: double minus in \"--x\"");
    }
}
