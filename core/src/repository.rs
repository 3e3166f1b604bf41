use crate::DocId;
use std::collections::{BTreeMap, HashMap};

/// Free-form document metadata; never interpreted by indexing or scoring.
pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, Clone)]
struct StoredDoc {
    text: String,
    meta: Metadata,
}

/// In-memory store of raw document text, used for snippets and document lookups.
#[derive(Debug, Default)]
pub struct DocumentRepo {
    docs: HashMap<DocId, StoredDoc>,
    order: Vec<DocId>,
}

impl DocumentRepo {
    pub fn new() -> Self { Self::default() }

    /// Store a document. Adding an id twice replaces text and metadata but keeps
    /// its original place in `all_docs` order.
    pub fn add(&mut self, doc_id: DocId, text: impl Into<String>, meta: Option<Metadata>) {
        let doc = StoredDoc { text: text.into(), meta: meta.unwrap_or_default() };
        if self.docs.insert(doc_id, doc).is_none() {
            self.order.push(doc_id);
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&str> {
        self.docs.get(&doc_id).map(|d| d.text.as_str())
    }

    pub fn meta(&self, doc_id: DocId) -> Option<&Metadata> {
        self.docs.get(&doc_id).map(|d| &d.meta)
    }

    /// All documents in insertion order.
    pub fn all_docs(&self) -> impl Iterator<Item = (DocId, &str)> + '_ {
        self.order.iter().filter_map(move |id| self.get(*id).map(|text| (*id, text)))
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }
}
