use search_core::tokenizer::{split_into_words, StopWords};
use search_core::Error;

#[test]
fn it_keeps_words_verbatim() {
    let words = split_into_words("Running runner's RUN! café");
    assert_eq!(words, vec!["Running", "runner's", "RUN!", "café"]);
}

#[test]
fn it_filters_stopwords() {
    let stop = StopWords::from_text("the and").unwrap();
    let words = stop.filter("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"and"));
    assert!(words.contains(&"The"));
}

#[test]
fn it_rejects_control_characters_in_stopwords() {
    assert!(matches!(StopWords::from_text("in\u{1f}to"), Err(Error::InvalidCharacter(_))));
    assert!(StopWords::from_text("").unwrap().is_empty());
}
