//! Fuzzy rules and the rule base.
//!
//! A [`FuzzyRule`] is only ever built once, from resolved data, at the end of
//! generation. There is no placeholder state and no mutation afterwards.

use crate::registry::Antecedent;

/// `IF antecedent THEN class WITH weight`.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyRule {
    antecedent: Antecedent,
    class_index: usize,
    weight: f64,
}

impl FuzzyRule {
    /// Build a final rule.
    ///
    /// `class_index` addresses the training class label set; `weight` is
    /// expected in (0.0, 1.0].
    pub fn new(antecedent: Antecedent, class_index: usize, weight: f64) -> Self {
        Self { antecedent, class_index, weight }
    }

    /// The label-index condition.
    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    /// Consequent class index.
    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Rule weight (confidence of the consequent).
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl core::fmt::Display for FuzzyRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "IF {} THEN {} RW: {:.4}",
            self.antecedent, self.class_index, self.weight
        )
    }
}

/// The final, immutable rule collection of a knowledge base.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleBase {
    rules: Vec<FuzzyRule>,
}

impl RuleBase {
    /// Wrap a finished list of rules.
    pub fn new(rules: Vec<FuzzyRule>) -> Self {
        Self { rules }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// `true` when no rule survived generation.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in generation order.
    pub fn iter(&self) -> core::slice::Iter<'_, FuzzyRule> {
        self.rules.iter()
    }

    /// The rules as a slice.
    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }
}

impl FromIterator<FuzzyRule> for RuleBase {
    fn from_iter<I: IntoIterator<Item = FuzzyRule>>(iter: I) -> Self {
        Self { rules: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a RuleBase {
    type Item = &'a FuzzyRule;
    type IntoIter = core::slice::Iter<'a, FuzzyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
