/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Matching-degree accumulator: the [candidate × class] support table.
//!
//! Cell `(i, c)` holds the sum, over every training example of class `c`, of
//! that example's matching degree against candidate `i`. This is the only
//! examples × candidates × features pass in training.
//!
//! # Invariants
//!
//! - All cells are non-negative sums of degrees in [0.0, 1.0].
//! - Rows are independent: each row is written by exactly one worker, so the
//!   `parallel` feature shards rows across rayon threads with no shared
//!   mutable state and produces bit-identical results to the serial pass.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::registry::{Antecedent, VariableRegistry};
use crate::variable::FeatureValue;

// ─── Matching Accumulator ───────────────────────────────────────────────────

/// Dense row-major table of accumulated matching degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchingAccumulator {
    rows: usize,
    classes: usize,
    cells: Vec<f64>,
}

impl MatchingAccumulator {
    /// A zeroed `rows × classes` table.
    pub fn new(rows: usize, classes: usize) -> Self {
        Self { rows, classes, cells: vec![0.0; rows * classes] }
    }

    /// Accumulate every example against every candidate.
    ///
    /// `classes[i]` is the class index of `examples[i]` and must be below
    /// `class_count`.
    pub fn accumulate<R>(
        registry: &VariableRegistry,
        candidates: &[Candidate],
        examples: &[R],
        classes: &[usize],
        class_count: usize,
    ) -> Self
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        let mut acc = Self::new(candidates.len(), class_count);
        if class_count == 0 {
            return acc;
        }

        #[cfg(feature = "parallel")]
        acc.cells
            .par_chunks_mut(class_count)
            .zip(candidates.par_iter())
            .for_each(|(row, cand)| fill_row(row, registry, &cand.antecedent, examples, classes));

        #[cfg(not(feature = "parallel"))]
        for (row, cand) in acc.cells.chunks_mut(class_count).zip(candidates) {
            fill_row(row, registry, &cand.antecedent, examples, classes);
        }

        acc
    }

    /// Number of candidate rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of class columns.
    pub fn class_count(&self) -> usize {
        self.classes
    }

    /// Per-class support of candidate `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.classes..(i + 1) * self.classes]
    }
}

fn fill_row<R: AsRef<[FeatureValue]>>(
    row: &mut [f64],
    registry: &VariableRegistry,
    antecedent: &Antecedent,
    examples: &[R],
    classes: &[usize],
) {
    for (example, &class) in examples.iter().zip(classes) {
        row[class] += registry.matching_degree(antecedent, example.as_ref());
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
