use crate::config::SNIPPET_CHARS;
use crate::error::SearchError;
use crate::index::{FrequencyIndex, PositionalIndex};
use crate::repository::DocumentRepo;
use crate::tokenizer::tokenize_query;
use crate::DocId;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#"^"(.*)"$"#).expect("valid regex");
}

/// How plain term queries are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// Conjunction of the query terms, unranked.
    Boolean,
    /// Ranked by summed tf-idf.
    #[default]
    TfIdf,
}

impl FromStr for SearchMethod {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boolean" => Ok(SearchMethod::Boolean),
            "tfidf" => Ok(SearchMethod::TfIdf),
            _ => Err(SearchError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMethod::Boolean => f.write_str("boolean"),
            SearchMethod::TfIdf => f.write_str("tfidf"),
        }
    }
}

/// Surface form of a query. Forms are tried in declaration order and the first
/// one that matches wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind<'q> {
    /// `"..."`: exact phrase, quotes stripped.
    Phrase(&'q str),
    /// `a OR b OR c`: any clause may match.
    Disjunction(Vec<&'q str>),
    /// Anything else: a list of terms.
    Terms(&'q str),
}

impl<'q> QueryKind<'q> {
    pub fn classify(query: &'q str) -> Self {
        let query = query.trim();
        if let Some(inner) = QUOTED.captures(query).and_then(|c| c.get(1)) {
            return QueryKind::Phrase(inner.as_str());
        }
        if query.contains(" OR ") {
            return QueryKind::Disjunction(query.split(" OR ").collect());
        }
        QueryKind::Terms(query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Leading characters of the raw document text.
    pub text: String,
}

/// Read-only view over both indexes and the repository that answers raw queries.
#[derive(Clone, Copy)]
pub struct QueryEngine<'a> {
    positional: &'a PositionalIndex,
    frequency: &'a FrequencyIndex,
    repo: &'a DocumentRepo,
}

impl<'a> QueryEngine<'a> {
    pub fn new(positional: &'a PositionalIndex, frequency: &'a FrequencyIndex, repo: &'a DocumentRepo) -> Self {
        Self { positional, frequency, repo }
    }

    /// Evaluate `query`. Phrase queries and `OR` queries ignore `method` and
    /// `top_k` and return hits without a score. Plain term queries use `method`;
    /// boolean hits carry a score of 0.
    pub fn search(&self, query: &str, method: SearchMethod, top_k: usize) -> Result<Vec<SearchHit>, SearchError> {
        let kind = QueryKind::classify(query);
        tracing::debug!(?kind, %method, top_k, "dispatching query");
        match kind {
            QueryKind::Phrase(phrase) => self
                .positional
                .phrase_search(phrase)
                .into_iter()
                .map(|(doc_id, _)| self.hit(doc_id, None))
                .collect(),
            QueryKind::Disjunction(clauses) => {
                let terms: Vec<String> = clauses.into_iter().flat_map(tokenize_query).collect();
                self.frequency
                    .boolean_or(&terms)
                    .into_iter()
                    .map(|doc_id| self.hit(doc_id, None))
                    .collect()
            }
            QueryKind::Terms(text) => {
                let terms = tokenize_query(text);
                match method {
                    SearchMethod::Boolean => self
                        .positional
                        .boolean_and(&terms)
                        .into_iter()
                        .map(|doc_id| self.hit(doc_id, Some(0.0)))
                        .collect(),
                    SearchMethod::TfIdf => self
                        .positional
                        .tf_idf_score(&terms, top_k)
                        .into_iter()
                        .map(|(doc_id, score)| self.hit(doc_id, Some(score)))
                        .collect(),
                }
            }
        }
    }

    fn hit(&self, doc_id: DocId, score: Option<f64>) -> Result<SearchHit, SearchError> {
        let Some(text) = self.repo.get(doc_id) else {
            tracing::error!(doc_id, "indexed document missing from repository");
            return Err(SearchError::MissingDocument(doc_id));
        };
        Ok(SearchHit { doc_id, score, text: snippet(text) })
    }
}

/// First `SNIPPET_CHARS` characters of `text`, cut without regard to word boundaries.
pub fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}
