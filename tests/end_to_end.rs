//! Fit / predict integration tests on a small three-cluster dataset.
//!
//! Two numeric features over [0, 2] with three labels each; every cluster sits
//! on its own grid cell, so the learned rule base has one rule per class.

use chi_frbcs::{ChiClassifier, ChiConfig, FeatureValue, FrbcsError, InferenceStrategy};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn row(a: f64, b: f64) -> Vec<FeatureValue> {
    vec![FeatureValue::Numeric(a), FeatureValue::Numeric(b)]
}

fn dataset() -> (Vec<Vec<FeatureValue>>, Vec<u32>) {
    let points = [
        // label 3: low corner
        (0.0, 0.1, 3),
        (0.1, 0.0, 3),
        (0.2, 0.2, 3),
        (0.1, 0.3, 3),
        (0.3, 0.1, 3),
        // label 5: centre
        (0.9, 1.0, 5),
        (1.0, 1.1, 5),
        (1.1, 0.9, 5),
        (1.0, 1.0, 5),
        (0.9, 1.1, 5),
        // label 9: high corner
        (1.8, 2.0, 9),
        (2.0, 1.9, 9),
        (1.9, 1.8, 9),
        (1.7, 2.0, 9),
        (2.0, 2.0, 9),
    ];
    let x = points.iter().map(|&(a, b, _)| row(a, b)).collect();
    let y = points.iter().map(|&(_, _, c)| c).collect();
    (x, y)
}

fn fitted(strategy: InferenceStrategy) -> ChiClassifier {
    let (x, y) = dataset();
    let mut chi = ChiClassifier::new(ChiConfig::new().with_labels(3).with_strategy(strategy));
    chi.fit(&x, &y).expect("fit");
    chi
}

// ── Training ─────────────────────────────────────────────────────────────────

#[test]
fn test_training_builds_one_rule_per_cluster() {
    let chi = fitted(InferenceStrategy::WinningRule);
    let kb = chi.knowledge_base().expect("fitted");
    assert_eq!(kb.rule_base().len(), 3);
    assert_eq!(kb.class_count(), 3);
    for (class, rule) in kb.rule_base().iter().enumerate() {
        assert_eq!(rule.class_index(), class);
        assert_eq!(rule.antecedent().labels(), &[class as u32, class as u32]);
        assert!(rule.weight() > 0.0 && rule.weight() <= 1.0);
    }
    assert_eq!(chi.class_labels().expect("fitted").labels(), &[3, 5, 9]);
}

#[test]
fn test_training_accuracy_is_high_under_both_strategies() {
    let (x, y) = dataset();
    for strategy in [InferenceStrategy::WinningRule, InferenceStrategy::AdditiveCombination] {
        let chi = fitted(strategy);
        let accuracy = chi.score(&x, &y).expect("score");
        assert!(accuracy >= 0.8, "{strategy}: accuracy {accuracy}");
    }
}

#[test]
fn test_unseen_points_follow_the_nearest_cluster() {
    let chi = fitted(InferenceStrategy::WinningRule);
    let queries = vec![row(0.15, 0.15), row(1.05, 0.95), row(1.85, 1.95)];
    assert_eq!(chi.predict(&queries).expect("predict"), vec![3, 5, 9]);
}

#[test]
fn test_predict_proba_has_one_column_per_class() {
    let (x, _) = dataset();
    let chi = fitted(InferenceStrategy::AdditiveCombination);
    let scores = chi.predict_proba(&x).expect("predict_proba");
    assert_eq!(scores.len(), x.len());
    for s in &scores {
        assert_eq!(s.len(), 3);
        assert!(s.iter().all(|&v| v >= 0.0));
    }
}

#[test]
fn test_predict_with_overrides_the_configured_strategy() {
    let (x, y) = dataset();
    let chi = fitted(InferenceStrategy::WinningRule);
    let wr = chi.predict(&x).expect("wr");
    let ac = chi.predict_with(&x, InferenceStrategy::AdditiveCombination).expect("ac");
    // Clusters are well separated: both methods agree on the training data.
    assert_eq!(wr, ac);
    assert_eq!(wr, y);
}

#[test]
fn test_refit_replaces_the_knowledge_base() {
    let (x, y) = dataset();
    let mut chi = fitted(InferenceStrategy::WinningRule);
    let two: Vec<Vec<FeatureValue>> = vec![row(0.0, 0.0), row(2.0, 2.0)];
    chi.fit(&two, &[1, 2]).expect("refit");
    assert_eq!(chi.class_labels().expect("fitted").labels(), &[1, 2]);
    assert_eq!(chi.knowledge_base().expect("fitted").rule_base().len(), 2);
    // None of the original labels can be predicted any more.
    assert_eq!(chi.score(&x, &y).expect("score"), 0.0);
}

#[test]
fn test_non_finite_values_are_rejected() {
    let chi = fitted(InferenceStrategy::WinningRule);
    let bad = vec![row(0.0, f64::NAN)];
    assert_eq!(chi.predict(&bad), Err(FrbcsError::NonFiniteValue { row: 0, column: 1 }));
}

#[test]
fn test_column_spanning_beyond_f64_max_still_trains() {
    // max - min overflows f64 for this column.
    let x: Vec<Vec<FeatureValue>> =
        [-1e308, -0.9e308, 0.9e308, 1e308].iter().map(|&v| vec![FeatureValue::Numeric(v)]).collect();
    let y = [0, 0, 1, 1];
    let mut chi = ChiClassifier::default();
    chi.fit(&x, &y).expect("fit");

    let kb = chi.knowledge_base().expect("fitted");
    assert_eq!(kb.rule_base().len(), 2);
    assert!(kb.rule_base().iter().all(|r| r.weight() == 1.0));
    assert_eq!(chi.predict(&x).expect("predict"), vec![0, 0, 1, 1]);
    for scores in chi.predict_proba(&x).expect("predict_proba") {
        assert!(scores.iter().all(|s| s.is_finite()), "{scores:?}");
    }
}
