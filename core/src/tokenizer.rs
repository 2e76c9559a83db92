use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use crate::error::{Error, Result};

lazy_static! {
    static ref CONTROL: Regex = Regex::new(r"[\x00-\x1F]").expect("valid regex");
}

/// Split text into words on runs of spaces. Empty fragments are dropped, order is kept.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// True when `text` holds no character below U+0020.
pub fn is_valid_text(text: &str) -> bool { !CONTROL.is_match(text) }

pub(crate) fn ensure_valid(text: &str) -> Result<()> {
    if is_valid_text(text) { Ok(()) } else { Err(Error::InvalidCharacter(text.to_string())) }
}

/// Words excluded from indexing and from query matching. Membership is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            ensure_valid(word)?;
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Build from a single space-separated line.
    pub fn from_text(text: &str) -> Result<Self> {
        ensure_valid(text)?;
        Self::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ { self.words.iter().map(String::as_str) }

    /// Words of `text` that are not stop words, in order.
    pub fn filter<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_into_words(text).into_iter().filter(|w| !self.contains(w)).collect()
    }
}
