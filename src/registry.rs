/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The variable registry (fuzzy data base): one descriptor per feature column.
//!
//! - [`Antecedent`]: structural label-index key, one entry per feature.
//! - [`VariableRegistry`]: builds descriptors from training columns, computes
//!   example fingerprints and rule matching degrees.
//!
//! # Invariants
//!
//! - Descriptors are fixed in column order at construction and never mutated.
//! - `matching_degree` is the product t-norm of per-feature memberships and
//!   returns exactly 0.0 as soon as any factor is 0.0.

use crate::error::{FrbcsError, Result};
use crate::variable::{ColumnKind, FeatureValue, FuzzyVariable, NominalVariable, Variable};

// ─── Antecedent ─────────────────────────────────────────────────────────────

/// The "IF" part of a rule: one label index per feature.
///
/// For nominal features the index addresses the column's category set, so
/// the key stays a plain integer vector with structural equality and hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Antecedent(Vec<u32>);

impl Antecedent {
    /// Wrap a label-index vector.
    pub fn new(labels: Vec<u32>) -> Self {
        Self(labels)
    }

    /// Label indices in feature order.
    pub fn labels(&self) -> &[u32] {
        &self.0
    }

    /// Number of features covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for a zero-feature antecedent.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for Antecedent {
    fn from(labels: Vec<u32>) -> Self {
        Self(labels)
    }
}

impl core::fmt::Display for Antecedent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, l) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", l)?;
        }
        f.write_str("]")
    }
}

// ─── Variable registry ──────────────────────────────────────────────────────

/// Per-column variable descriptors shared read-only by training and inference.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableRegistry {
    variables: Vec<Variable>,
    labels: usize,
}

impl VariableRegistry {
    /// Build descriptors, inferring each column's kind from the training values.
    ///
    /// Numeric columns get `labels` uniform triangular labels over their
    /// observed `[min, max]`; nominal columns get one label per category.
    pub fn from_training<R: AsRef<[FeatureValue]>>(rows: &[R], labels: usize) -> Result<Self> {
        let schema = Self::infer_schema(rows)?;
        Self::from_schema(rows, &schema, labels)
    }

    /// Build descriptors from an explicitly declared column schema.
    pub fn from_schema<R: AsRef<[FeatureValue]>>(
        rows: &[R],
        schema: &[ColumnKind],
        labels: usize,
    ) -> Result<Self> {
        if labels == 0 {
            return Err(FrbcsError::InvalidLabelCount { labels });
        }
        if rows.is_empty() {
            return Err(FrbcsError::EmptyTrainingSet);
        }
        for (i, row) in rows.iter().enumerate() {
            validate_against(schema, i, row.as_ref())?;
        }

        let variables = schema
            .iter()
            .enumerate()
            .map(|(column, kind)| match kind {
                ColumnKind::Numeric => {
                    let (min, max) = rows
                        .iter()
                        .filter_map(|r| r.as_ref()[column].as_numeric())
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                            (lo.min(v), hi.max(v))
                        });
                    Variable::Fuzzy(FuzzyVariable::uniform(labels, min, max))
                }
                ColumnKind::Nominal => Variable::Nominal(NominalVariable::from_values(
                    rows.iter()
                        .filter_map(|r| r.as_ref()[column].as_nominal()),
                )),
            })
            .collect();

        Ok(Self { variables, labels })
    }

    /// Reassemble a registry from already-built descriptors (used on restore).
    pub fn from_variables(variables: Vec<Variable>, labels: usize) -> Self {
        Self { variables, labels }
    }

    /// Infer the column schema from the first row, then check every other row
    /// agrees column by column.
    pub fn infer_schema<R: AsRef<[FeatureValue]>>(rows: &[R]) -> Result<Vec<ColumnKind>> {
        let first = rows.first().ok_or(FrbcsError::EmptyTrainingSet)?.as_ref();
        let schema: Vec<ColumnKind> = first.iter().map(FeatureValue::kind).collect();
        for (i, row) in rows.iter().enumerate().skip(1) {
            let row = row.as_ref();
            if row.len() != schema.len() {
                return Err(FrbcsError::FeatureCountMismatch {
                    row: i,
                    expected: schema.len(),
                    found: row.len(),
                });
            }
            if let Some(column) = row.iter().zip(&schema).position(|(v, k)| v.kind() != *k) {
                return Err(FrbcsError::MixedColumnKind { column });
            }
        }
        Ok(schema)
    }

    /// Number of feature columns.
    pub fn feature_count(&self) -> usize {
        self.variables.len()
    }

    /// Configured fuzzy label count (nominal columns ignore it).
    pub fn label_count(&self) -> usize {
        self.labels
    }

    /// All descriptors in column order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Column schema implied by the descriptors.
    pub fn schema(&self) -> Vec<ColumnKind> {
        self.variables.iter().map(Variable::kind).collect()
    }

    /// Check that `row` (at index `index` of its table) fits this registry.
    pub fn validate_row(&self, index: usize, row: &[FeatureValue]) -> Result<()> {
        if row.len() != self.variables.len() {
            return Err(FrbcsError::FeatureCountMismatch {
                row: index,
                expected: self.variables.len(),
                found: row.len(),
            });
        }
        for (column, (var, value)) in self.variables.iter().zip(row).enumerate() {
            check_value(var.kind(), index, column, value)?;
        }
        Ok(())
    }

    /// Antecedent fingerprint of `example`: the best-matching label per feature.
    ///
    /// `None` if some value has no label here (a category unseen in training
    /// or a value of the wrong kind).
    pub fn fingerprint(&self, example: &[FeatureValue]) -> Option<Antecedent> {
        self.variables
            .iter()
            .zip(example)
            .map(|(var, value)| var.label_index(value))
            .collect::<Option<Vec<u32>>>()
            .map(Antecedent)
    }

    /// Product t-norm matching degree of `example` against `antecedent`.
    ///
    /// Exits with 0.0 at the first zero factor.
    pub fn matching_degree(&self, antecedent: &Antecedent, example: &[FeatureValue]) -> f64 {
        let mut degree = 1.0;
        for ((var, &label), value) in self.variables.iter().zip(antecedent.labels()).zip(example) {
            degree *= var.membership(label, value);
            if degree == 0.0 {
                return 0.0;
            }
        }
        degree
    }
}

fn validate_against(schema: &[ColumnKind], index: usize, row: &[FeatureValue]) -> Result<()> {
    if row.len() != schema.len() {
        return Err(FrbcsError::FeatureCountMismatch {
            row: index,
            expected: schema.len(),
            found: row.len(),
        });
    }
    for (column, (kind, value)) in schema.iter().zip(row).enumerate() {
        check_value(*kind, index, column, value)?;
    }
    Ok(())
}

fn check_value(kind: ColumnKind, row: usize, column: usize, value: &FeatureValue) -> Result<()> {
    if value.kind() != kind {
        return Err(FrbcsError::ColumnKindMismatch { row, column, expected: kind.name() });
    }
    match value {
        FeatureValue::Numeric(v) if !v.is_finite() => Err(FrbcsError::NonFiniteValue { row, column }),
        _ => Ok(()),
    }
}
