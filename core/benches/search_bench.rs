use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{DocumentStatus, SearchEngine};

const WORDS: &[&str] = &[
    "curly", "cat", "tail", "dog", "fancy", "collar", "white", "fluffy", "groomed", "eyes", "starling", "park",
];

fn build_engine(docs: i32) -> SearchEngine {
    let mut engine = SearchEngine::from_stop_words_text("and in on with the").unwrap();
    for id in 0..docs {
        let text: Vec<&str> = (0..8).map(|i| WORDS[(id as usize * 7 + i * 3) % WORDS.len()]).collect();
        engine.add_document(id, &text.join(" "), DocumentStatus::Actual, &[id % 10, 3]).unwrap();
    }
    engine
}

fn bench_search(c: &mut Criterion) {
    c.bench_function("add_1000_documents", |b| b.iter(|| build_engine(1000)));

    let engine = build_engine(1000);
    c.bench_function("find_top_documents", |b| b.iter(|| engine.find_top_documents("curly dog -park fancy").unwrap()));
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
