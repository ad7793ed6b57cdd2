//! Candidate rule table built by grid covering.
//!
//! One entry per distinct antecedent fingerprint actually observed in the
//! training data, in order of first occurrence, each with the set of classes
//! seen at that grid cell. The table lives only for the duration of one
//! generation pass.

use hashbrown::HashMap;

use crate::registry::{Antecedent, VariableRegistry};
use crate::variable::FeatureValue;

/// A grid cell seen in training, with the classes observed there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// The cell's fingerprint.
    pub antecedent: Antecedent,
    /// Distinct class indices observed at this cell, ascending.
    pub classes: Vec<usize>,
}

impl Candidate {
    fn observe(&mut self, class: usize) {
        if let Err(pos) = self.classes.binary_search(&class) {
            self.classes.insert(pos, class);
        }
    }
}

/// Insertion-ordered map of antecedent → observed class set.
#[derive(Debug, Default)]
pub struct CandidateTable {
    index: HashMap<Antecedent, usize>,
    candidates: Vec<Candidate>,
}

impl CandidateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint every example and record its class.
    ///
    /// Examples whose fingerprint is undefined are skipped with a warning.
    /// `classes[i]` is the class index of `rows[i]`.
    pub fn from_examples<R: AsRef<[FeatureValue]>>(
        registry: &VariableRegistry,
        rows: &[R],
        classes: &[usize],
    ) -> Self {
        let mut table = Self::new();
        for (i, (row, &class)) in rows.iter().zip(classes).enumerate() {
            match registry.fingerprint(row.as_ref()) {
                Some(antecedent) => table.insert(antecedent, class),
                None => tracing::warn!(row = i, "example has no fingerprint; skipped as candidate"),
            }
        }
        table
    }

    /// Record that `class` was observed at `antecedent`.
    pub fn insert(&mut self, antecedent: Antecedent, class: usize) {
        match self.position(&antecedent) {
            Some(i) => self.candidates[i].observe(class),
            None => {
                self.index.insert(antecedent.clone(), self.candidates.len());
                self.candidates.push(Candidate { antecedent, classes: vec![class] });
            }
        }
    }

    /// Number of distinct fingerprints.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in first-occurrence order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Position of `antecedent` in the table, if present.
    pub fn position(&self, antecedent: &Antecedent) -> Option<usize> {
        self.index.get(antecedent).copied()
    }

    /// Consume the table, keeping the ordered candidates.
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}
