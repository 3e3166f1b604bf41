use crate::config::DUMP_POSITIONS_PER_DOC;
use crate::scoring::{idf, Tally};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Write as _;

pub type TermId = u32;
pub type DocId = u32;

/// Per-document payload stored for a term.
pub trait Posting: Default {
    /// Record one occurrence at `position` in the document's full word sequence.
    fn record(&mut self, position: usize);
    fn term_frequency(&self) -> u32;
    /// Short human-readable form used by index dumps.
    fn describe(&self) -> String;
}

/// Occurrence count of a term in one document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount(pub u32);

impl Posting for TermCount {
    fn record(&mut self, _position: usize) { self.0 += 1; }
    fn term_frequency(&self) -> u32 { self.0 }
    fn describe(&self) -> String { self.0.to_string() }
}

/// Positions of a term in one document, in scan order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPositions(pub Vec<usize>);

impl TermPositions {
    pub fn positions(&self) -> &[usize] { &self.0 }

    /// Linear membership test. Re-indexing a document appends a second scan's
    /// positions, so the list is not guaranteed to be sorted.
    pub fn contains(&self, position: usize) -> bool {
        self.0.contains(&position)
    }
}

impl Posting for TermPositions {
    fn record(&mut self, position: usize) { self.0.push(position); }
    fn term_frequency(&self) -> u32 { self.0.len() as u32 }
    fn describe(&self) -> String {
        let shown = &self.0[..self.0.len().min(DUMP_POSITIONS_PER_DOC)];
        format!("{shown:?}")
    }
}

/// Postings of one term: documents in the order they were first seen, plus a
/// lookup from document id to its slot.
#[derive(Debug)]
pub struct PostingList<P> {
    entries: Vec<(DocId, P)>,
    slots: HashMap<DocId, usize>,
}

impl<P: Posting> PostingList<P> {
    fn new() -> Self {
        Self { entries: Vec::new(), slots: HashMap::new() }
    }

    fn entry(&mut self, doc_id: DocId) -> &mut P {
        let slot = match self.slots.get(&doc_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push((doc_id, P::default()));
                self.slots.insert(doc_id, slot);
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn get(&self, doc_id: DocId) -> Option<&P> {
        self.slots.get(&doc_id).map(|&slot| &self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &P)> + '_ {
        self.entries.iter().map(|(doc_id, p)| (*doc_id, p))
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.entries.iter().map(|(doc_id, _)| *doc_id)
    }

    /// Number of documents containing the term.
    pub fn doc_freq(&self) -> usize { self.entries.len() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents_indexed: usize,
    pub unique_terms: usize,
    pub total_term_occurrences: u64,
}

/// In-memory inverted index over a posting payload `P`.
///
/// Terms are interned in first-seen order; `postings[term_id]` holds that
/// term's posting list. Stop words are never interned.
#[derive(Debug)]
pub struct InvertedIndex<P> {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    postings: Vec<PostingList<P>>,
    docs: HashSet<DocId>,
}

/// Term → document → occurrence count.
pub type FrequencyIndex = InvertedIndex<TermCount>;
/// Term → document → ordered token positions.
pub type PositionalIndex = InvertedIndex<TermPositions>;

impl<P: Posting> Default for InvertedIndex<P> {
    fn default() -> Self {
        Self { dictionary: HashMap::new(), terms: Vec::new(), postings: Vec::new(), docs: HashSet::new() }
    }
}

impl<P: Posting> InvertedIndex<P> {
    pub fn new() -> Self { Self::default() }

    /// Add every non-stop-word occurrence in `text` to the postings of `doc_id`.
    /// Indexing the same id twice accumulates on top of the earlier postings.
    pub fn index_document(&mut self, doc_id: DocId, text: &str) {
        let tokens = tokenize(text);
        tracing::debug!(doc_id, tokens = tokens.len(), "indexing document");
        for (term, pos) in tokens {
            let tid = match self.dictionary.get(&term) {
                Some(&tid) => tid,
                None => {
                    let tid = self.terms.len() as TermId;
                    self.dictionary.insert(term.clone(), tid);
                    self.terms.push(term);
                    self.postings.push(PostingList::new());
                    tid
                }
            };
            self.postings[tid as usize].entry(doc_id).record(pos);
            self.docs.insert(doc_id);
        }
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList<P>> {
        self.dictionary.get(term).map(|&tid| &self.postings[tid as usize])
    }

    pub fn contains_term(&self, term: &str) -> bool { self.dictionary.contains_key(term) }

    /// Distinct documents with at least one indexed term (`N` in idf).
    pub fn num_docs(&self) -> usize { self.docs.len() }

    /// Documents containing at least one of `terms`. Unknown terms contribute nothing.
    pub fn boolean_or<S: AsRef<str>>(&self, terms: &[S]) -> BTreeSet<DocId> {
        terms
            .iter()
            .filter_map(|t| self.postings(t.as_ref()))
            .flat_map(|list| list.doc_ids())
            .collect()
    }

    /// Documents containing every known term of `terms`. Unknown terms are
    /// ignored; when no term is known the result is empty.
    pub fn boolean_and<S: AsRef<str>>(&self, terms: &[S]) -> BTreeSet<DocId> {
        let mut lists = terms.iter().filter_map(|t| self.postings(t.as_ref()));
        let Some(first) = lists.next() else { return BTreeSet::new() };
        let mut result: BTreeSet<DocId> = first.doc_ids().collect();
        for list in lists {
            result.retain(|doc_id| list.get(*doc_id).is_some());
        }
        result
    }

    /// Rank documents by summed `tf * idf` over `terms`, highest first. Equal
    /// scores keep the order in which documents were first scored.
    pub fn tf_idf_score<S: AsRef<str>>(&self, terms: &[S], top_k: usize) -> Vec<(DocId, f64)> {
        let n = self.num_docs();
        let mut scores = Tally::new();
        for term in terms {
            let Some(list) = self.postings(term.as_ref()) else { continue };
            let weight = idf(n, list.doc_freq());
            for (doc_id, posting) in list.iter() {
                scores.add(doc_id, posting.term_frequency() as f64 * weight);
            }
        }
        let mut ranked = scores.into_ranked();
        ranked.truncate(top_k);
        ranked
    }

    pub fn stats(&self) -> IndexStats {
        let total_term_occurrences = self
            .postings
            .iter()
            .flat_map(|list| list.iter())
            .map(|(_, p)| p.term_frequency() as u64)
            .sum();
        IndexStats {
            documents_indexed: self.docs.len(),
            unique_terms: self.terms.len(),
            total_term_occurrences,
        }
    }

    /// Human-readable listing of the first `limit` terms in first-seen order.
    /// A debugging aid; the format is not stable.
    pub fn dump(&self, limit: usize) -> String {
        let mut out = String::new();
        for (term, list) in self.terms.iter().zip(&self.postings).take(limit) {
            let docs: Vec<String> = list.iter().map(|(doc_id, p)| format!("{doc_id}: {}", p.describe())).collect();
            let _ = writeln!(out, "{term} -> {{{}}}", docs.join(", "));
        }
        out
    }
}
