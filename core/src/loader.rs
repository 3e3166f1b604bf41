//! Reads documents from disk into a [`Corpus`].
//!
//! `.txt` files are one document each. `.json` files hold one document object or
//! an array of them, `.jsonl` files one object per line.

use crate::corpus::Corpus;
use crate::error::LoadError;
use crate::repository::Metadata;
use crate::DocId;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static! {
    static ref START_RE: Regex = RegexBuilder::new(r"\*\*\*\s*START OF (THIS|THE) PROJECT GUTENBERG EBOOK.*")
        .case_insensitive(true)
        .build()
        .expect("valid regex");
    static ref END_RE: Regex = RegexBuilder::new(r"\*\*\*\s*END OF (THIS|THE) PROJECT GUTENBERG EBOOK.*")
        .case_insensitive(true)
        .build()
        .expect("valid regex");
}

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: serde_json::Value,
    body: String,
    title: Option<String>,
    url: Option<String>,
    #[serde(default)]
    meta: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Assigns dense document ids in load order, continuing across calls.
#[derive(Debug, Default)]
pub struct Loader {
    next_doc_id: DocId,
}

impl Loader {
    pub fn new() -> Self { Self::default() }

    /// Load a file, or every supported file under a directory in sorted path
    /// order. Returns the number of documents added.
    pub fn load(&mut self, input: &Path, corpus: &mut Corpus) -> Result<usize, LoadError> {
        if !input.exists() {
            return Err(LoadError::NotFound(input.to_path_buf()));
        }
        let mut files: Vec<PathBuf> = Vec::new();
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry.map_err(|source| LoadError::Walk { path: input.to_path_buf(), source })?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(input.to_path_buf());
        }

        let mut added = 0;
        for file in files {
            added += match file.extension().and_then(|s| s.to_str()) {
                Some("txt") => self.load_text(&file, corpus)?,
                Some("jsonl") => self.load_jsonl(&file, corpus)?,
                Some("json") => self.load_json(&file, corpus)?,
                _ => {
                    tracing::debug!(path = %file.display(), "skipping unsupported file");
                    0
                }
            };
        }
        tracing::info!(input = %input.display(), added, "loaded documents");
        Ok(added)
    }

    fn load_text(&mut self, file: &Path, corpus: &mut Corpus) -> Result<usize, LoadError> {
        let raw = fs::read_to_string(file).map_err(|source| io_error(file, source))?;
        let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        let mut meta = Metadata::new();
        meta.insert("external_id".into(), stem.clone());
        meta.insert("title".into(), stem);
        meta.insert("path".into(), file.display().to_string());
        self.ingest(corpus, strip_gutenberg_framing(&raw), meta);
        Ok(1)
    }

    fn load_jsonl(&mut self, file: &Path, corpus: &mut Corpus) -> Result<usize, LoadError> {
        let f = File::open(file).map_err(|source| io_error(file, source))?;
        let reader = BufReader::new(f);
        let mut added = 0;
        for (n, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| io_error(file, source))?;
            if line.trim().is_empty() { continue; }
            let doc: InputDoc = serde_json::from_str(&line)
                .map_err(|source| LoadError::Json { path: file.to_path_buf(), line: n + 1, source })?;
            self.ingest_input(corpus, doc);
            added += 1;
        }
        Ok(added)
    }

    fn load_json(&mut self, file: &Path, corpus: &mut Corpus) -> Result<usize, LoadError> {
        let f = File::open(file).map_err(|source| io_error(file, source))?;
        let json_error = |source: serde_json::Error| LoadError::Json { path: file.to_path_buf(), line: 0, source };
        let json: serde_json::Value = serde_json::from_reader(BufReader::new(f)).map_err(json_error)?;
        let docs: Vec<InputDoc> = match json {
            serde_json::Value::Array(arr) => arr
                .into_iter()
                .map(serde_json::from_value::<InputDoc>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(json_error)?,
            other => vec![serde_json::from_value(other).map_err(json_error)?],
        };
        let added = docs.len();
        for doc in docs {
            self.ingest_input(corpus, doc);
        }
        Ok(added)
    }

    fn ingest_input(&mut self, corpus: &mut Corpus, doc: InputDoc) {
        let mut meta = Metadata::new();
        for (key, value) in doc.meta.into_iter().flatten() {
            if let serde_json::Value::String(s) = value {
                meta.insert(key, s);
            }
        }
        let external_id = match doc.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        meta.insert("external_id".into(), external_id);
        if let Some(title) = doc.title { meta.insert("title".into(), title); }
        if let Some(url) = doc.url { meta.insert("url".into(), url); }
        self.ingest(corpus, &doc.body, meta);
    }

    fn ingest(&mut self, corpus: &mut Corpus, text: &str, meta: Metadata) {
        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;
        corpus.add_document(doc_id, text, Some(meta));
    }
}

/// Body between the Project Gutenberg start and end markers, or the whole
/// text (trimmed) when the markers are missing or out of order.
pub fn strip_gutenberg_framing(text: &str) -> &str {
    let text = text.trim_start_matches('\u{feff}');
    match (START_RE.find(text), END_RE.find(text)) {
        (Some(start), Some(end)) if start.end() < end.start() => text[start.end()..end.start()].trim(),
        _ => text.trim(),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io { path: path.to_path_buf(), source }
}
