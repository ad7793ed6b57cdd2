//! Mixed categorical / numeric training and inference.

use chi_frbcs::{
    Antecedent, ChiClassifier, ColumnKind, FeatureValue, FrbcsError, InferenceStrategy,
    KnowledgeBase, Variable, VariableRegistry,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn row(colour: &str, size: f64) -> Vec<FeatureValue> {
    vec![FeatureValue::from(colour), FeatureValue::Numeric(size)]
}

/// Class is decided by colour alone; size is noise.
fn coloured() -> (Vec<Vec<FeatureValue>>, Vec<u32>) {
    let x = vec![
        row("red", 0.0),
        row("red", 1.0),
        row("red", 2.0),
        row("blue", 0.0),
        row("blue", 1.0),
        row("blue", 2.0),
    ];
    (x, vec![1, 1, 1, 2, 2, 2])
}

fn fitted() -> ChiClassifier {
    let (x, y) = coloured();
    let mut chi = ChiClassifier::default();
    chi.fit(&x, &y).expect("fit");
    chi
}

// ── Registry ─────────────────────────────────────────────────────────────────

#[test]
fn test_categorical_column_becomes_nominal_variable() {
    let (x, _) = coloured();
    let registry = VariableRegistry::from_training(&x, 3).expect("registry");
    assert_eq!(registry.schema(), vec![ColumnKind::Nominal, ColumnKind::Numeric]);
    match &registry.variables()[0] {
        Variable::Nominal(v) => assert_eq!(v.categories(), &["blue".to_string(), "red".to_string()]),
        other => panic!("expected nominal variable, got {other:?}"),
    }
    // Category labels are sorted: blue = 0, red = 1.
    assert_eq!(registry.fingerprint(&row("red", 2.0)), Some(Antecedent::new(vec![1, 2])));
    assert_eq!(registry.fingerprint(&row("green", 2.0)), None);
}

#[test]
fn test_nominal_membership_is_crisp() {
    let (x, _) = coloured();
    let registry = VariableRegistry::from_training(&x, 3).expect("registry");
    let red_low = Antecedent::new(vec![1, 0]);
    assert_eq!(registry.matching_degree(&red_low, &row("red", 0.0)), 1.0);
    assert_eq!(registry.matching_degree(&red_low, &row("blue", 0.0)), 0.0);
    assert!((registry.matching_degree(&red_low, &row("red", 0.5)) - 0.5).abs() < 1e-12);
}

// ── Generation ───────────────────────────────────────────────────────────────

#[test]
fn test_crisp_colour_split_gives_full_weight_rules() {
    let chi = fitted();
    let kb = chi.knowledge_base().expect("fitted");
    // One rule per (colour, size label) cell, none of them contested.
    assert_eq!(kb.rule_base().len(), 6);
    assert!(kb.rule_base().iter().all(|r| r.weight() == 1.0));
}

#[test]
fn test_shared_category_is_penalised() {
    let x: Vec<Vec<FeatureValue>> =
        ["a", "a", "a", "b"].iter().map(|&c| vec![FeatureValue::from(c)]).collect();
    let registry = VariableRegistry::from_training(&x, 3).expect("registry");
    let kb = KnowledgeBase::generate_with_observer(registry, &x, &[0, 0, 1, 1], 2, &mut ())
        .expect("generate");
    let rules = kb.rule_base().rules();
    assert_eq!(rules.len(), 2);
    // Cell "a": support 2 for class 0, 1 for class 1 → (2 - 1) / 3.
    assert_eq!(rules[0].class_index(), 0);
    assert!((rules[0].weight() - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(rules[1].class_index(), 1);
    assert_eq!(rules[1].weight(), 1.0);
}

// ── Inference ────────────────────────────────────────────────────────────────

#[test]
fn test_prediction_follows_the_category() {
    let chi = fitted();
    let queries = vec![row("red", 0.5), row("blue", 1.5), row("red", 1.9)];
    assert_eq!(chi.predict(&queries).expect("predict"), vec![1, 2, 1]);
}

#[test]
fn test_unseen_category_matches_no_rule() {
    let chi = fitted();
    let scores = chi.predict_proba(&[row("green", 1.0)]).expect("predict_proba");
    assert_eq!(scores, vec![vec![0.0, 0.0]]);
    // All-zero scores resolve to the first class label.
    assert_eq!(chi.predict(&[row("green", 1.0)]).expect("predict"), vec![1]);
    assert_eq!(
        chi.predict_with(&[row("green", 1.0)], InferenceStrategy::AdditiveCombination)
            .expect("predict"),
        vec![1]
    );
}

#[test]
fn test_wrong_value_kind_is_rejected() {
    let chi = fitted();
    let swapped = vec![vec![FeatureValue::Numeric(1.0), FeatureValue::from("red")]];
    assert_eq!(
        chi.predict(&swapped),
        Err(FrbcsError::ColumnKindMismatch { row: 0, column: 0, expected: "nominal" })
    );
}

#[test]
fn test_mixed_training_column_is_rejected() {
    let x = vec![row("red", 0.0), vec![FeatureValue::Numeric(1.0), FeatureValue::Numeric(1.0)]];
    let mut chi = ChiClassifier::default();
    assert_eq!(chi.fit(&x, &[0, 1]), Err(FrbcsError::MixedColumnKind { column: 0 }));
    assert!(!chi.is_fitted());
}
