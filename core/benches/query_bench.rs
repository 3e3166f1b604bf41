use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{Corpus, SearchMethod};

fn build_corpus() -> Corpus {
    let vocab = ["river", "stone", "light", "harbor", "winter", "garden", "signal", "copper", "meadow", "lantern"];
    let mut corpus = Corpus::new();
    for doc_id in 0..2_000u32 {
        let text: Vec<&str> = (0..120).map(|i| vocab[(doc_id as usize * 7 + i * 3 + i / 5) % vocab.len()]).collect();
        corpus.add_document(doc_id, &text.join(" the "), None);
    }
    corpus
}

fn bench_queries(c: &mut Criterion) {
    let corpus = build_corpus();
    let engine = corpus.engine();
    c.bench_function("tfidf_two_terms", |b| b.iter(|| engine.search("river lantern", SearchMethod::TfIdf, 10)));
    c.bench_function("boolean_two_terms", |b| b.iter(|| engine.search("river lantern", SearchMethod::Boolean, 10)));
    c.bench_function("or_query", |b| b.iter(|| engine.search("stone OR copper", SearchMethod::TfIdf, 10)));
    c.bench_function("phrase_search", |b| b.iter(|| corpus.positional.phrase_search("river stone")));
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
