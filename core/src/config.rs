//! Fixed limits shared by the library and its front ends.

/// Number of characters of raw document text returned with every hit.
pub const SNIPPET_CHARS: usize = 300;

/// Ranked results returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_K: usize = 10;

/// Upper bound on `k` accepted over HTTP.
pub const MAX_HTTP_TOP_K: usize = 100;

/// Terms listed by a frequency index dump when no limit is given.
pub const FREQUENCY_DUMP_LIMIT: usize = 10;

/// Terms listed by a positional index dump when no limit is given. Position
/// lists are long, so fewer terms are shown.
pub const POSITIONAL_DUMP_LIMIT: usize = 5;

/// Positions shown per document in a positional dump.
pub const DUMP_POSITIONS_PER_DOC: usize = 5;
