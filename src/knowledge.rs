/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The knowledge base: variable registry plus rule base, and the engine that
//! builds it.
//!
//! # Generation (grid covering)
//!
//! ```text
//! examples ──fingerprint──▶ CandidateTable ──▶ MatchingAccumulator ──PCF──▶ RuleBase
//!            (one per          (antecedent →       [candidate × class]      (weight > 0
//!             example)          class set)          support sums)             only)
//! ```
//!
//! Progress is reported through a [`GenerationObserver`] rather than printed;
//! [`TracingObserver`] forwards it to `tracing`, `()` discards it.
//!
//! # Invariants
//!
//! - Generation is deterministic: same input, same rule base.
//! - Every kept rule has `0 < weight <= 1`.
//! - Candidate count ≤ number of training examples.
//! - Registry and rule base are never mutated after construction, so a
//!   `&KnowledgeBase` can serve concurrent inference.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::accumulator::MatchingAccumulator;
use crate::candidate::CandidateTable;
use crate::error::{FrbcsError, Result};
use crate::inference::{argmax, InferenceStrategy};
use crate::registry::VariableRegistry;
use crate::rule::{FuzzyRule, RuleBase};
use crate::variable::FeatureValue;
use crate::weight::resolve_conflict;

// ─── Observer ───────────────────────────────────────────────────────────────

/// Stages of rule generation, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Fingerprinting examples into the candidate table.
    RuleGeneration,
    /// Filling the candidate × class accumulator.
    MatchingDegrees,
    /// Computing PCF weights and resolving conflicts.
    RuleWeights,
}

/// Receives progress events from [`KnowledgeBase::generate_with_observer`].
///
/// Every method defaults to doing nothing.
pub trait GenerationObserver {
    /// A new stage is starting.
    fn phase(&mut self, _phase: GenerationPhase) {}
    /// The candidate table is complete.
    fn candidates(&mut self, _count: usize) {}
    /// A rule survived conflict resolution.
    fn rule_found(&mut self, _rule: &FuzzyRule) {}
    /// Generation finished with `rule_count` rules.
    fn finished(&mut self, _rule_count: usize) {}
}

/// Discards all events.
impl GenerationObserver for () {}

/// Forwards generation events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn phase(&mut self, phase: GenerationPhase) {
        tracing::info!(?phase, "rule generation phase");
    }

    fn candidates(&mut self, count: usize) {
        tracing::info!(candidates = count, "candidate rules collected");
    }

    fn rule_found(&mut self, rule: &FuzzyRule) {
        tracing::debug!(
            antecedent = %rule.antecedent(),
            class = rule.class_index(),
            weight = rule.weight(),
            "rule found"
        );
    }

    fn finished(&mut self, rule_count: usize) {
        tracing::info!(rules = rule_count, "rule base generated");
    }
}

// ─── Knowledge Base ─────────────────────────────────────────────────────────

/// Variable registry plus the final rule base.
#[derive(Clone, Debug, PartialEq)]
pub struct KnowledgeBase {
    registry: VariableRegistry,
    rule_base: RuleBase,
    class_count: usize,
}

impl KnowledgeBase {
    /// Generate a rule base from training data, logging progress via `tracing`.
    ///
    /// `classes[i]` is the class index (below `class_count`) of `examples[i]`.
    pub fn generate<R>(
        registry: VariableRegistry,
        examples: &[R],
        classes: &[usize],
        class_count: usize,
    ) -> Result<Self>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        Self::generate_with_observer(registry, examples, classes, class_count, &mut TracingObserver)
    }

    /// Generate a rule base, reporting progress to `observer`.
    pub fn generate_with_observer<R>(
        registry: VariableRegistry,
        examples: &[R],
        classes: &[usize],
        class_count: usize,
        observer: &mut dyn GenerationObserver,
    ) -> Result<Self>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        validate_training(&registry, examples, classes, class_count)?;

        observer.phase(GenerationPhase::RuleGeneration);
        let table = CandidateTable::from_examples(&registry, examples, classes);
        observer.candidates(table.len());

        observer.phase(GenerationPhase::MatchingDegrees);
        let candidates = table.into_candidates();
        let acc =
            MatchingAccumulator::accumulate(&registry, &candidates, examples, classes, class_count);

        observer.phase(GenerationPhase::RuleWeights);
        let mut rules = Vec::with_capacity(candidates.len());
        for (i, candidate) in candidates.into_iter().enumerate() {
            if let Some((class, weight)) = resolve_conflict(acc.row(i), &candidate.classes) {
                let rule = FuzzyRule::new(candidate.antecedent, class, weight);
                observer.rule_found(&rule);
                rules.push(rule);
            }
        }
        observer.finished(rules.len());

        Ok(Self { registry, rule_base: RuleBase::new(rules), class_count })
    }

    /// Assemble a knowledge base from existing parts (restore, hand-built rules).
    pub fn from_parts(registry: VariableRegistry, rule_base: RuleBase, class_count: usize) -> Self {
        Self { registry, rule_base, class_count }
    }

    /// The variable registry.
    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// The final rule base.
    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }

    /// Number of classes score vectors are sized to.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Raw per-class scores of one example. The example is assumed to match
    /// the registry schema; see [`VariableRegistry::validate_row`].
    pub fn class_scores(&self, example: &[FeatureValue], strategy: InferenceStrategy) -> Vec<f64> {
        let activations = self.rule_base.iter().map(|rule| {
            let degree = self.registry.matching_degree(rule.antecedent(), example);
            (rule.class_index(), degree * rule.weight())
        });
        strategy.aggregate(activations, self.class_count)
    }

    /// Predicted class index of one example (lowest index on ties, 0 when
    /// no rule fires).
    pub fn classify(&self, example: &[FeatureValue], strategy: InferenceStrategy) -> usize {
        argmax(&self.class_scores(example, strategy))
    }

    /// Raw score vectors for a batch, after validating every row.
    pub fn predict_scores<R>(&self, rows: &[R], strategy: InferenceStrategy) -> Result<Vec<Vec<f64>>>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        self.validate_rows(rows)?;

        #[cfg(feature = "parallel")]
        let scores = rows
            .par_iter()
            .map(|row| self.class_scores(row.as_ref(), strategy))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let scores = rows
            .iter()
            .map(|row| self.class_scores(row.as_ref(), strategy))
            .collect();

        Ok(scores)
    }

    /// Predicted class indices for a batch, after validating every row.
    pub fn predict<R>(&self, rows: &[R], strategy: InferenceStrategy) -> Result<Vec<usize>>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        Ok(self
            .predict_scores(rows, strategy)?
            .iter()
            .map(|scores| argmax(scores))
            .collect())
    }

    fn validate_rows<R: AsRef<[FeatureValue]>>(&self, rows: &[R]) -> Result<()> {
        rows.iter()
            .enumerate()
            .try_for_each(|(i, row)| self.registry.validate_row(i, row.as_ref()))
    }
}

fn validate_training<R: AsRef<[FeatureValue]>>(
    registry: &VariableRegistry,
    examples: &[R],
    classes: &[usize],
    class_count: usize,
) -> Result<()> {
    if examples.is_empty() {
        return Err(FrbcsError::EmptyTrainingSet);
    }
    if examples.len() != classes.len() {
        return Err(FrbcsError::LabelCountMismatch {
            examples: examples.len(),
            labels: classes.len(),
        });
    }
    for (row, (example, &class)) in examples.iter().zip(classes).enumerate() {
        registry.validate_row(row, example.as_ref())?;
        if class >= class_count {
            return Err(FrbcsError::ClassOutOfRange { row, class, class_count });
        }
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Antecedent;

    // ── Helpers ──────────────────────────────────────────────────────────

    fn rows(values: &[f64]) -> Vec<Vec<FeatureValue>> {
        values.iter().map(|&v| vec![FeatureValue::Numeric(v)]).collect()
    }

    /// Two well-separated classes on one feature over [0, 2].
    fn two_class() -> (Vec<Vec<FeatureValue>>, Vec<usize>) {
        (rows(&[0.0, 0.1, 0.2, 1.8, 1.9, 2.0]), vec![0, 0, 0, 1, 1, 1])
    }

    fn generate(xs: &[Vec<FeatureValue>], ys: &[usize], classes: usize) -> KnowledgeBase {
        let reg = VariableRegistry::from_training(xs, 3).unwrap();
        KnowledgeBase::generate_with_observer(reg, xs, ys, classes, &mut ()).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        phases: Vec<GenerationPhase>,
        candidates: usize,
        rules: usize,
        finished: Option<usize>,
    }

    impl GenerationObserver for Recorder {
        fn phase(&mut self, phase: GenerationPhase) {
            self.phases.push(phase);
        }
        fn candidates(&mut self, count: usize) {
            self.candidates = count;
        }
        fn rule_found(&mut self, _rule: &FuzzyRule) {
            self.rules += 1;
        }
        fn finished(&mut self, rule_count: usize) {
            self.finished = Some(rule_count);
        }
    }

    // ── Generation ───────────────────────────────────────────────────────

    #[test]
    fn test_generation_separable_classes() {
        let (xs, ys) = two_class();
        let kb = generate(&xs, &ys, 2);
        assert_eq!(kb.rule_base().len(), 2);
        let r0 = &kb.rule_base().rules()[0];
        assert_eq!(r0.antecedent(), &Antecedent::new(vec![0]));
        assert_eq!(r0.class_index(), 0);
        let r1 = &kb.rule_base().rules()[1];
        assert_eq!(r1.antecedent(), &Antecedent::new(vec![2]));
        assert_eq!(r1.class_index(), 1);
        // Label 0 and label 2 never see the other class: weight exactly 1.
        assert_eq!(r0.weight(), 1.0);
        assert_eq!(r1.weight(), 1.0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let xs = rows(&[0.0, 0.4, 0.6, 0.9, 1.1, 1.3, 1.6, 2.0, 0.5, 1.5]);
        let ys = vec![0, 0, 1, 1, 0, 1, 1, 1, 0, 0];
        assert_eq!(generate(&xs, &ys, 2), generate(&xs, &ys, 2));
    }

    #[test]
    fn test_overlapping_cell_penalised() {
        // The label 1 cell holds one example of each class.
        let xs = rows(&[0.0, 0.75, 1.25, 2.0]);
        let ys = vec![0, 0, 1, 1];
        let kb = generate(&xs, &ys, 2);
        for rule in kb.rule_base() {
            assert!(rule.weight() > 0.0 && rule.weight() <= 1.0);
        }
        let mid = kb
            .rule_base()
            .iter()
            .find(|r| r.antecedent() == &Antecedent::new(vec![1]));
        // 0.75 and 1.25 match label 1 equally and the edge examples give it
        // nothing, so the mid cell is an even split (PCF 0) and is dropped.
        assert!(mid.is_none(), "{:?}", mid);
    }

    #[test]
    fn test_single_class_dataset_weights_are_one() {
        let xs = rows(&[0.0, 0.3, 0.8, 1.2, 2.0]);
        let ys = vec![0; 5];
        let kb = generate(&xs, &ys, 1);
        assert!(!kb.rule_base().is_empty());
        for rule in kb.rule_base() {
            assert_eq!(rule.weight(), 1.0);
            assert_eq!(rule.class_index(), 0);
        }
    }

    #[test]
    fn test_observer_sees_every_phase() {
        let (xs, ys) = two_class();
        let reg = VariableRegistry::from_training(&xs, 3).unwrap();
        let mut rec = Recorder::default();
        let kb = KnowledgeBase::generate_with_observer(reg, &xs, &ys, 2, &mut rec).unwrap();
        assert_eq!(
            rec.phases,
            vec![
                GenerationPhase::RuleGeneration,
                GenerationPhase::MatchingDegrees,
                GenerationPhase::RuleWeights
            ]
        );
        assert_eq!(rec.candidates, 2);
        assert_eq!(rec.rules, kb.rule_base().len());
        assert_eq!(rec.finished, Some(kb.rule_base().len()));
    }

    #[test]
    fn test_generation_rejects_malformed_input() {
        let (xs, ys) = two_class();
        let reg = VariableRegistry::from_training(&xs, 3).unwrap();

        let none: Vec<Vec<FeatureValue>> = Vec::new();
        assert_eq!(
            KnowledgeBase::generate_with_observer(reg.clone(), &none, &[], 2, &mut ()),
            Err(FrbcsError::EmptyTrainingSet)
        );
        assert_eq!(
            KnowledgeBase::generate_with_observer(reg.clone(), &xs, &ys[..3], 2, &mut ()),
            Err(FrbcsError::LabelCountMismatch { examples: 6, labels: 3 })
        );
        assert_eq!(
            KnowledgeBase::generate_with_observer(reg.clone(), &xs, &ys, 1, &mut ()),
            Err(FrbcsError::ClassOutOfRange { row: 3, class: 1, class_count: 1 })
        );
        let wide = vec![vec![FeatureValue::Numeric(0.0), FeatureValue::Numeric(1.0)]];
        assert_eq!(
            KnowledgeBase::generate_with_observer(reg, &wide, &[0], 2, &mut ()),
            Err(FrbcsError::FeatureCountMismatch { row: 0, expected: 1, found: 2 })
        );
    }

    // ── Inference ────────────────────────────────────────────────────────

    #[test]
    fn test_classify_recovers_training_labels() {
        let (xs, ys) = two_class();
        let kb = generate(&xs, &ys, 2);
        for strategy in [InferenceStrategy::WinningRule, InferenceStrategy::AdditiveCombination] {
            assert_eq!(kb.predict(&xs, strategy).unwrap(), ys);
        }
    }

    #[test]
    fn test_unmatched_example_scores_all_zero() {
        let (xs, ys) = two_class();
        let kb = generate(&xs, &ys, 2);
        // Far outside every triangle: no rule fires.
        let far = [FeatureValue::Numeric(100.0)];
        for strategy in [InferenceStrategy::WinningRule, InferenceStrategy::AdditiveCombination] {
            assert_eq!(kb.class_scores(&far, strategy), vec![0.0, 0.0]);
            assert_eq!(kb.classify(&far, strategy), 0);
        }
    }

    #[test]
    fn test_predict_scores_are_unnormalised() {
        let xs = rows(&[0.0, 2.0]);
        let ys = vec![0, 1];
        let kb = generate(&xs, &ys, 2);
        // At x = 0.5 only the label-0 rule fires, at half strength.
        let scores = kb.predict_scores(&rows(&[0.5]), InferenceStrategy::AdditiveCombination).unwrap();
        assert_eq!(scores.len(), 1);
        let total: f64 = scores[0].iter().sum();
        assert!((total - 0.5).abs() < 1e-12, "scores={:?}", scores);
    }

    #[test]
    fn test_predict_validates_schema() {
        let (xs, ys) = two_class();
        let kb = generate(&xs, &ys, 2);
        let bad = vec![vec![FeatureValue::from("x")]];
        assert_eq!(
            kb.predict(&bad, InferenceStrategy::WinningRule),
            Err(FrbcsError::ColumnKindMismatch { row: 0, column: 0, expected: "numeric" })
        );
    }
}
