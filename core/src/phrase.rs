use crate::index::{PositionalIndex, PostingList, TermPositions};
use crate::scoring::Tally;
use crate::tokenizer::words;
use crate::DocId;

impl PositionalIndex {
    /// Count, per document, the start positions where the words of `phrase`
    /// occur consecutively. Results are sorted by match count, ties in the order
    /// documents appear in the first word's postings.
    ///
    /// The phrase is split without stop-word removal. Stop words are never
    /// indexed, so a phrase containing one never matches.
    pub fn phrase_search(&self, phrase: &str) -> Vec<(DocId, u32)> {
        let words = words(phrase);
        let lists: Option<Vec<&PostingList<TermPositions>>> =
            words.iter().map(|w| self.postings(w)).collect();
        let Some(lists) = lists else { return Vec::new() };
        let Some((first, rest)) = lists.split_first() else { return Vec::new() };

        let mut matches = Tally::new();
        for (doc_id, starts) in first.iter() {
            for &start in starts.positions() {
                let consecutive = rest.iter().enumerate().all(|(i, list)| {
                    list.get(doc_id).map_or(false, |p| p.contains(start + i + 1))
                });
                if consecutive {
                    matches.add(doc_id, 1u32);
                }
            }
        }
        matches.into_ranked()
    }
}
