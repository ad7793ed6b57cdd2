//! Portable snapshot of a fitted classifier for persistence and transport.
//!
//! Captures exactly what inference needs: the per-column descriptors, the
//! training class labels, and the rule base. Restoring rebuilds the
//! triangular partitions from `[min, max, labels]`, so no retraining happens.
//!
//! ```text
//! KnowledgeBaseSnapshot
//! ├── version        u16 = 1
//! ├── config         { labels, strategy }
//! ├── class_labels   [u32]           ascending; index = class index
//! ├── variables      [VariableRecord] one per feature, column order
//! └── rules          [RuleRecord]    (antecedent, class_index, weight)
//! ```
//!
//! This module requires the `serde` feature.

use crate::classifier::{ChiClassifier, ClassLabelSet};
use crate::config::ChiConfig;
use crate::error::{FrbcsError, Result};
use crate::knowledge::KnowledgeBase;
use crate::registry::{Antecedent, VariableRegistry};
use crate::rule::{FuzzyRule, RuleBase};
use crate::variable::{FuzzyVariable, NominalVariable, Variable};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

/// A serialisable fitted classifier.
///
/// ```rust,ignore
/// let snapshot = KnowledgeBaseSnapshot::from_classifier(&chi)?;
/// let json = serde_json::to_string(&snapshot)?;
/// let restored: KnowledgeBaseSnapshot = serde_json::from_str(&json)?;
/// let chi = restored.into_classifier()?;
/// ```
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct KnowledgeBaseSnapshot {
    /// Format version, [`SNAPSHOT_VERSION`] for new snapshots.
    pub version: u16,
    /// Configuration the classifier was trained with.
    pub config: ChiConfig,
    /// Training class labels, ascending.
    pub class_labels: Vec<u32>,
    /// One descriptor per feature, in column order.
    pub variables: Vec<VariableRecord>,
    /// The final rule base, in generation order.
    pub rules: Vec<RuleRecord>,
}

/// Serialisable form of a column descriptor.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableRecord {
    /// Uniform triangular partition of `[min, max]`.
    Fuzzy {
        /// Lower bound of the training range.
        min: f64,
        /// Upper bound of the training range.
        max: f64,
        /// Number of labels.
        labels: usize,
    },
    /// Crisp categorical labels.
    Nominal {
        /// Category reference set, sorted.
        categories: Vec<String>,
    },
}

impl From<&Variable> for VariableRecord {
    fn from(v: &Variable) -> Self {
        match v {
            Variable::Fuzzy(f) => Self::Fuzzy { min: f.min(), max: f.max(), labels: f.label_count() },
            Variable::Nominal(n) => Self::Nominal { categories: n.categories().to_vec() },
        }
    }
}

impl VariableRecord {
    fn restore(&self, column: usize) -> Result<Variable> {
        match self {
            Self::Fuzzy { min, max, labels } => {
                if *labels == 0 || !min.is_finite() || !max.is_finite() || min > max {
                    return Err(FrbcsError::InvalidSnapshot(format!(
                        "variable {column}: bad fuzzy partition [{min}, {max}] x {labels}"
                    )));
                }
                Ok(Variable::Fuzzy(FuzzyVariable::uniform(*labels, *min, *max)))
            }
            Self::Nominal { categories } => {
                let restored = NominalVariable::from_values(categories.iter().cloned());
                if restored.categories() != categories.as_slice() {
                    return Err(FrbcsError::InvalidSnapshot(format!(
                        "variable {column}: categories must be sorted and unique"
                    )));
                }
                Ok(Variable::Nominal(restored))
            }
        }
    }
}

/// Serialisable form of a [`FuzzyRule`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct RuleRecord {
    /// Label index per feature.
    pub antecedent: Vec<u32>,
    /// Consequent class index into `class_labels`.
    pub class_index: usize,
    /// Rule weight in (0.0, 1.0].
    pub weight: f64,
}

impl From<&FuzzyRule> for RuleRecord {
    fn from(r: &FuzzyRule) -> Self {
        Self {
            antecedent: r.antecedent().labels().to_vec(),
            class_index: r.class_index(),
            weight: r.weight(),
        }
    }
}

impl KnowledgeBaseSnapshot {
    /// Capture a fitted classifier.
    pub fn from_classifier(chi: &ChiClassifier) -> Result<Self> {
        let kb = chi.knowledge_base().ok_or(FrbcsError::NotFitted)?;
        let class_labels = chi.class_labels().ok_or(FrbcsError::NotFitted)?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            config: chi.config().clone(),
            class_labels: class_labels.labels().to_vec(),
            variables: kb.registry().variables().iter().map(VariableRecord::from).collect(),
            rules: kb.rule_base().iter().map(RuleRecord::from).collect(),
        })
    }

    /// Number of rules in the snapshot.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Validate and rebuild a fitted classifier.
    pub fn into_classifier(self) -> Result<ChiClassifier> {
        if self.version != SNAPSHOT_VERSION {
            return Err(FrbcsError::UnsupportedSnapshotVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        self.config.validate()?;

        let class_labels = ClassLabelSet::from_sorted(self.class_labels)
            .filter(|set| !set.is_empty())
            .ok_or_else(|| {
                FrbcsError::InvalidSnapshot("class labels must be non-empty, sorted and unique".into())
            })?;

        let variables = self
            .variables
            .iter()
            .enumerate()
            .map(|(column, record)| record.restore(column))
            .collect::<Result<Vec<Variable>>>()?;

        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(i, record)| restore_rule(i, record, &variables, class_labels.len()))
            .collect::<Result<RuleBase>>()?;

        let registry = VariableRegistry::from_variables(variables, self.config.labels);
        let kb = KnowledgeBase::from_parts(registry, rules, class_labels.len());
        Ok(ChiClassifier::from_parts(self.config, class_labels, kb))
    }
}

fn restore_rule(
    index: usize,
    record: RuleRecord,
    variables: &[Variable],
    class_count: usize,
) -> Result<FuzzyRule> {
    if record.antecedent.len() != variables.len() {
        return Err(FrbcsError::InvalidSnapshot(format!(
            "rule {index}: antecedent has {} labels for {} variables",
            record.antecedent.len(),
            variables.len()
        )));
    }
    if let Some(column) = record
        .antecedent
        .iter()
        .zip(variables)
        .position(|(&label, var)| label as usize >= var.label_count())
    {
        return Err(FrbcsError::InvalidSnapshot(format!(
            "rule {index}: label out of range for variable {column}"
        )));
    }
    if record.class_index >= class_count {
        return Err(FrbcsError::InvalidSnapshot(format!(
            "rule {index}: class index {} out of range",
            record.class_index
        )));
    }
    if !(record.weight > 0.0 && record.weight <= 1.0) {
        return Err(FrbcsError::InvalidSnapshot(format!(
            "rule {index}: weight {} outside (0, 1]",
            record.weight
        )));
    }
    Ok(FuzzyRule::new(Antecedent::new(record.antecedent), record.class_index, record.weight))
}
