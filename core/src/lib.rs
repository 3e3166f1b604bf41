//! In-memory text search: tokenization, frequency and positional inverted
//! indexes, and a query engine for boolean, ranked and phrase retrieval.
//!
//! Ingestion and querying are synchronous and single-threaded. All documents
//! must be added before queries begin; share a finished [`Corpus`] read-only
//! (for example behind an `Arc`) if several readers need it.

pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod loader;
mod phrase;
pub mod query;
pub mod repository;
pub mod scoring;
pub mod tokenizer;

pub use corpus::{Corpus, CorpusStats};
pub use error::{LoadError, SearchError};
pub use index::{DocId, FrequencyIndex, IndexStats, InvertedIndex, PositionalIndex, Posting, TermCount, TermId, TermPositions};
pub use loader::Loader;
pub use query::{QueryEngine, QueryKind, SearchHit, SearchMethod};
pub use repository::{DocumentRepo, Metadata};
