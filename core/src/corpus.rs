use crate::index::{FrequencyIndex, IndexStats, PositionalIndex};
use crate::query::QueryEngine;
use crate::repository::{DocumentRepo, Metadata};
use crate::DocId;
use serde::Serialize;

/// Repository plus both index variants, populated together by a single writer.
#[derive(Debug, Default)]
pub struct Corpus {
    pub repo: DocumentRepo,
    pub frequency: FrequencyIndex,
    pub positional: PositionalIndex,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CorpusStats {
    pub documents_stored: usize,
    pub frequency: IndexStats,
    pub positional: IndexStats,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    pub fn add_document(&mut self, doc_id: DocId, text: &str, meta: Option<Metadata>) {
        self.frequency.index_document(doc_id, text);
        self.positional.index_document(doc_id, text);
        self.repo.add(doc_id, text, meta);
    }

    pub fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.positional, &self.frequency, &self.repo)
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents_stored: self.repo.len(),
            frequency: self.frequency.stats(),
            positional: self.positional.stats(),
        }
    }
}
