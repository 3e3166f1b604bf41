//! Score accumulation shared by ranked retrieval and phrase matching.

use crate::DocId;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::AddAssign;

/// Smoothed inverse document frequency: `ln((N + 1) / (df + 1)) + 1`.
pub fn idf(num_docs: usize, doc_freq: usize) -> f64 {
    ((num_docs as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
}

/// Per-document running totals that remember the order documents were first seen.
#[derive(Debug)]
pub struct Tally<T> {
    totals: Vec<(DocId, T)>,
    slots: HashMap<DocId, usize>,
}

impl<T: Copy + AddAssign + PartialOrd> Tally<T> {
    pub fn new() -> Self {
        Self { totals: Vec::new(), slots: HashMap::new() }
    }

    pub fn add(&mut self, doc_id: DocId, amount: T) {
        match self.slots.get(&doc_id) {
            Some(&slot) => self.totals[slot].1 += amount,
            None => {
                self.slots.insert(doc_id, self.totals.len());
                self.totals.push((doc_id, amount));
            }
        }
    }

    /// Totals sorted descending; ties keep first-seen order (the sort is stable
    /// and `totals` is already in first-seen order).
    pub fn into_ranked(self) -> Vec<(DocId, T)> {
        let mut ranked = self.totals;
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }
}

impl<T: Copy + AddAssign + PartialOrd> Default for Tally<T> {
    fn default() -> Self { Self::new() }
}
