use search_core::{Corpus, DocumentRepo, FrequencyIndex, PositionalIndex, QueryEngine, SearchError, SearchMethod};

fn sample_corpus() -> Corpus {
    let mut corpus = Corpus::new();
    corpus.add_document(1, "the cat sat on the mat", None);
    corpus.add_document(2, "the dog sat on the log", None);
    corpus.add_document(3, "cats and dogs are friends", None);
    corpus
}

#[test]
fn boolean_and_over_shared_term() {
    let corpus = sample_corpus();
    let docs: Vec<u32> = corpus.positional.boolean_and(&["sat"]).into_iter().collect();
    assert_eq!(docs, vec![1, 2]);
    let docs: Vec<u32> = corpus.frequency.boolean_and(&["sat"]).into_iter().collect();
    assert_eq!(docs, vec![1, 2]);
}

#[test]
fn boolean_and_over_disjoint_vocabularies_is_empty() {
    let corpus = sample_corpus();
    assert!(corpus.frequency.boolean_and(&["cat", "dog"]).is_empty());
    assert!(corpus.positional.boolean_and(&["cat", "dog"]).is_empty());
}

#[test]
fn boolean_and_ignores_unknown_terms_but_not_all_unknown() {
    let corpus = sample_corpus();
    let docs: Vec<u32> = corpus.frequency.boolean_and(&["cat", "unicorn"]).into_iter().collect();
    assert_eq!(docs, vec![1]);
    assert!(corpus.frequency.boolean_and(&["unicorn"]).is_empty());
    assert!(corpus.frequency.boolean_and::<&str>(&[]).is_empty());
}

#[test]
fn unknown_terms_give_empty_results() {
    let corpus = sample_corpus();
    assert!(corpus.frequency.boolean_or(&["unicorn"]).is_empty());
    assert!(corpus.positional.boolean_or(&["the"]).is_empty());
    assert!(corpus.frequency.tf_idf_score(&["unicorn"], 10).is_empty());
    assert!(corpus.positional.tf_idf_score(&["unicorn"], 10).is_empty());
}

#[test]
fn tf_idf_ties_follow_index_order() {
    let corpus = sample_corpus();
    let expected = (4.0f64 / 3.0).ln() + 1.0;
    for ranked in [corpus.positional.tf_idf_score(&["sat"], 10), corpus.frequency.tf_idf_score(&["sat"], 10)] {
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, 1);
        assert_eq!(ranked[1].0, 2);
        assert!((ranked[0].1 - expected).abs() < 1e-9);
        assert!((ranked[0].1 - 1.2877).abs() < 1e-4);
        assert_eq!(ranked[0].1, ranked[1].1);
    }
}

#[test]
fn tf_idf_is_idempotent_and_respects_top_k() {
    let corpus = sample_corpus();
    let first = corpus.positional.tf_idf_score(&["sat", "cat", "dogs"], 10);
    let second = corpus.positional.tf_idf_score(&["sat", "cat", "dogs"], 10);
    assert_eq!(first, second);
    assert_eq!(first[0].0, 1);
    assert_eq!(corpus.positional.tf_idf_score(&["sat", "cat", "dogs"], 1), first[..1].to_vec());
    assert!(corpus.positional.tf_idf_score(&["sat"], 0).is_empty());
}

#[test]
fn tf_idf_ties_use_first_seen_not_doc_id() {
    let mut idx = PositionalIndex::new();
    idx.index_document(9, "alpha");
    idx.index_document(4, "alpha");
    let ranked = idx.tf_idf_score(&["alpha"], 10);
    assert_eq!(ranked.iter().map(|(d, _)| *d).collect::<Vec<_>>(), vec![9, 4]);
}

#[test]
fn term_frequency_raises_score() {
    let mut idx = FrequencyIndex::new();
    idx.index_document(1, "fish");
    idx.index_document(2, "fish fish fish");
    idx.index_document(3, "bird");
    let ranked = idx.tf_idf_score(&["fish"], 10);
    assert_eq!(ranked[0].0, 2);
    assert!((ranked[0].1 - 3.0 * ranked[1].1).abs() < 1e-9);
}

#[test]
fn phrase_search_scenarios() {
    let corpus = sample_corpus();
    assert_eq!(corpus.positional.phrase_search("cat sat"), vec![(1, 1)]);
    assert!(corpus.positional.phrase_search("the cat").is_empty());
    assert!(corpus.positional.phrase_search("sat on the mat").is_empty());
}

#[test]
fn positions_match_full_word_sequence() {
    let corpus = sample_corpus();
    let cat = corpus.positional.postings("cat").unwrap();
    assert_eq!(cat.get(1).unwrap().positions(), &[1]);
    let mat = corpus.positional.postings("mat").unwrap();
    assert_eq!(mat.get(1).unwrap().positions(), &[5]);
    let friends = corpus.positional.postings("friends").unwrap();
    assert_eq!(friends.get(3).unwrap().positions(), &[4]);
}

#[test]
fn stats_for_both_variants() {
    let corpus = sample_corpus();
    let stats = corpus.stats();
    assert_eq!(stats.documents_stored, 3);
    // cat sat mat dog log cats dogs friends
    assert_eq!(stats.frequency.unique_terms, 8);
    assert_eq!(stats.frequency.documents_indexed, 3);
    assert_eq!(stats.frequency.total_term_occurrences, 9);
    assert_eq!(stats.positional, stats.frequency);
}

#[test]
fn engine_phrase_query() {
    let corpus = sample_corpus();
    let hits = corpus.engine().search("\"cat sat\"", SearchMethod::TfIdf, 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, 1);
    assert_eq!(hits[0].score, None);
    assert_eq!(hits[0].text, "the cat sat on the mat");
}

#[test]
fn engine_or_query_has_no_scores() {
    let corpus = sample_corpus();
    let hits = corpus.engine().search("cat OR dog", SearchMethod::TfIdf, 10).unwrap();
    let ids: Vec<u32> = hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(hits.iter().all(|h| h.score.is_none()));
    let json = serde_json::to_value(&hits[0]).unwrap();
    assert!(json.get("score").is_none());
}

#[test]
fn engine_or_query_drops_stopword_clauses() {
    let corpus = sample_corpus();
    let hits = corpus.engine().search("the OR and", SearchMethod::TfIdf, 10).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn engine_boolean_query_scores_zero() {
    let corpus = sample_corpus();
    let hits = corpus.engine().search("sat", SearchMethod::Boolean, 10).unwrap();
    assert_eq!(hits.iter().map(|h| h.doc_id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(hits.iter().all(|h| h.score == Some(0.0)));
    assert_eq!(hits[1].text, "the dog sat on the log");
}

#[test]
fn engine_tfidf_query_is_ranked() {
    let corpus = sample_corpus();
    let hits = corpus.engine().search("  the cat sat  ", SearchMethod::TfIdf, 10).unwrap();
    assert_eq!(hits[0].doc_id, 1);
    assert_eq!(hits[1].doc_id, 2);
    assert!(hits[0].score.unwrap() > hits[1].score.unwrap());
    assert_eq!(corpus.engine().search("sat", SearchMethod::TfIdf, 1).unwrap().len(), 1);
}

#[test]
fn engine_snippet_is_first_300_chars() {
    let mut corpus = Corpus::new();
    let long = format!("needle {}", "x".repeat(500));
    corpus.add_document(1, &long, None);
    let hits = corpus.engine().search("needle", SearchMethod::TfIdf, 10).unwrap();
    assert_eq!(hits[0].text.chars().count(), 300);
    assert!(long.starts_with(&hits[0].text));
}

#[test]
fn engine_fails_fast_on_missing_repository_entry() {
    let mut positional = PositionalIndex::new();
    let mut frequency = FrequencyIndex::new();
    positional.index_document(5, "orphan");
    frequency.index_document(5, "orphan");
    let repo = DocumentRepo::new();
    let engine = QueryEngine::new(&positional, &frequency, &repo);
    let err = engine.search("orphan", SearchMethod::TfIdf, 10).unwrap_err();
    assert!(matches!(err, SearchError::MissingDocument(5)));
    assert!(err.to_string().contains("invariant violation"));
    assert!(engine.search("orphan OR x", SearchMethod::TfIdf, 10).is_err());
    assert!(engine.search("\"orphan\"", SearchMethod::TfIdf, 10).is_err());
}
