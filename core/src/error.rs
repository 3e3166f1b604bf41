use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// An index reported a document the repository has never seen. Index and
    /// repository are populated together, so this is a programming error.
    #[error("invariant violation: doc {0} is indexed but missing from the document repository")]
    MissingDocument(DocId),
    #[error("unknown search method `{0}` (expected `boolean` or `tfidf`)")]
    UnknownMethod(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {} (line {line}): {source}", .path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("input path {} does not exist", .0.display())]
    NotFound(PathBuf),
}
