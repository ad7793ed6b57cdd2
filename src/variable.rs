//! Feature values and the per-column variable descriptors.
//!
//! A numeric column becomes a [`FuzzyVariable`]: a uniform partition of the
//! observed `[min, max]` range into overlapping triangular labels. A categorical
//! column becomes a [`NominalVariable`]: one crisp label per distinct category.
//! Both are wrapped in the tagged [`Variable`] so the kind is decided once, at
//! registry construction, and never inspected per value again.
//!
//! # Invariants
//!
//! - Every membership degree is in [0.0, 1.0].
//! - Nominal membership is exactly 1.0 or exactly 0.0.
//! - `label_index` ties go to the lowest label index.

use core::fmt;

// ─── Feature values ─────────────────────────────────────────────────────────

/// A single cell of a feature table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureValue {
    /// A real-valued measurement.
    Numeric(f64),
    /// A categorical value, compared by exact string equality.
    Nominal(String),
}

impl FeatureValue {
    /// The column kind this value belongs to.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Nominal(_) => ColumnKind::Nominal,
        }
    }

    /// The numeric payload, if any.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Nominal(_) => None,
        }
    }

    /// The categorical payload, if any.
    pub fn as_nominal(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Nominal(s) => Some(s),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(s: &str) -> Self {
        Self::Nominal(s.to_owned())
    }
}

impl From<String> for FeatureValue {
    fn from(s: String) -> Self {
        Self::Nominal(s)
    }
}

/// Declared or inferred type of a feature column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    /// Real-valued; partitioned into triangular fuzzy labels.
    Numeric,
    /// Categorical; one crisp label per category.
    Nominal,
}

impl ColumnKind {
    /// Lower-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Nominal => "nominal",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Triangular fuzzy sets ──────────────────────────────────────────────────

/// Triangular membership function: 0 at `left`, 1 at `centre`, 0 at `right`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangularSet {
    /// Left foot (membership reaches 0).
    pub left: f64,
    /// Peak (membership 1).
    pub centre: f64,
    /// Right foot (membership reaches 0).
    pub right: f64,
}

impl TriangularSet {
    /// Construct a set from its three break points. Requires `left <= centre <= right`.
    pub fn new(left: f64, centre: f64, right: f64) -> Self {
        debug_assert!(left <= centre && centre <= right);
        Self { left, centre, right }
    }

    /// Membership degree of `x` in [0.0, 1.0].
    ///
    /// A collapsed set (`left == right`) is crisp: 1.0 at the centre only.
    pub fn membership(&self, x: f64) -> f64 {
        if x < self.left || x > self.right {
            0.0
        } else if x == self.centre {
            1.0
        } else if x < self.centre {
            // Halved so differences of finite break points cannot overflow.
            (0.5 * x - 0.5 * self.left) / (0.5 * self.centre - 0.5 * self.left)
        } else {
            (0.5 * self.right - 0.5 * x) / (0.5 * self.right - 0.5 * self.centre)
        }
    }
}

// ─── Fuzzy variable ─────────────────────────────────────────────────────────

/// A numeric column partitioned into evenly spaced triangular labels.
///
/// Adjacent labels overlap so that, inside `[min, max]`, the memberships of
/// the two labels around any value sum to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyVariable {
    min: f64,
    max: f64,
    sets: Vec<TriangularSet>,
}

impl FuzzyVariable {
    /// Build `labels` triangles with centres evenly spaced from `min` to
    /// `max`. Each triangle's feet are its neighbours' centres; the two edge
    /// triangles extend one spacing past the range, saturating at the finite
    /// `f64` bounds.
    ///
    /// Centres are interpolated from halved bounds, so a column spanning more
    /// than `f64::MAX` still gets a finite partition.
    ///
    /// With `labels == 1` the single label covers `[min, max]` with membership 1.
    /// A constant column (`min == max`) collapses every label onto that value.
    /// Callers guarantee `labels >= 1`, finite bounds and `min <= max`.
    pub fn uniform(labels: usize, min: f64, max: f64) -> Self {
        debug_assert!(labels >= 1 && min <= max);
        if labels == 1 {
            let sets = vec![TriangularSet::new(min, 0.5 * min + 0.5 * max, max)];
            return Self { min, max, sets };
        }

        let last = labels - 1;
        let half_span = 0.5 * max - 0.5 * min;
        let centres: Vec<f64> = (0..labels)
            .map(|i| match i {
                0 => min,
                i if i == last => max,
                i => 2.0 * (0.5 * min + half_span * (i as f64 / last as f64)),
            })
            .collect();

        let sets = (0..labels)
            .map(|i| {
                let left = match i {
                    0 => (centres[0] - (centres[1] - centres[0])).max(f64::MIN),
                    i => centres[i - 1],
                };
                let right = if i == last {
                    (centres[last] + (centres[last] - centres[last - 1])).min(f64::MAX)
                } else {
                    centres[i + 1]
                };
                TriangularSet::new(left, centres[i], right)
            })
            .collect();
        Self { min, max, sets }
    }

    /// Lower bound of the observed training range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the observed training range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of linguistic labels.
    pub fn label_count(&self) -> usize {
        self.sets.len()
    }

    /// The triangular set behind label `label`, if it exists.
    pub fn set(&self, label: usize) -> Option<&TriangularSet> {
        self.sets.get(label)
    }

    /// Membership of `x` in label `label`. Unknown labels yield 0.0.
    pub fn membership(&self, label: usize, x: f64) -> f64 {
        if self.sets.len() == 1 {
            return if label == 0 && x >= self.min && x <= self.max { 1.0 } else { 0.0 };
        }
        self.sets.get(label).map_or(0.0, |s| s.membership(x))
    }

    /// Label with maximal membership for `x`, lowest index on ties.
    ///
    /// `x` is clamped to the training range first so out-of-range values map
    /// to the nearest edge label instead of an all-zero tie.
    pub fn label_index(&self, x: f64) -> u32 {
        let x = x.clamp(self.min, self.max);
        let mut best = 0usize;
        let mut best_degree = self.membership(0, x);
        for label in 1..self.sets.len() {
            let degree = self.membership(label, x);
            if degree > best_degree {
                best = label;
                best_degree = degree;
            }
        }
        best as u32
    }
}

// ─── Nominal variable ───────────────────────────────────────────────────────

/// A categorical column: one crisp label per distinct training category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NominalVariable {
    /// Sorted, deduplicated categories.
    categories: Vec<String>,
}

impl NominalVariable {
    /// Build from the observed column values. Order of input is irrelevant.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = values.into_iter().map(Into::into).collect();
        categories.sort_unstable();
        categories.dedup();
        Self { categories }
    }

    /// The category reference set, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of categories (one label each).
    pub fn label_count(&self) -> usize {
        self.categories.len()
    }

    /// Label index of `value`, or `None` for a category unseen in training.
    pub fn label_index(&self, value: &str) -> Option<u32> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
            .map(|i| i as u32)
    }

    /// 1.0 when `value` equals the category of `label`, otherwise 0.0.
    pub fn membership(&self, label: usize, value: &str) -> f64 {
        match self.categories.get(label) {
            Some(c) if c == value => 1.0,
            _ => 0.0,
        }
    }
}

// ─── Tagged descriptor ──────────────────────────────────────────────────────

/// One column's descriptor, resolved once from the column kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Variable {
    /// Numeric column with triangular labels.
    Fuzzy(FuzzyVariable),
    /// Categorical column with crisp labels.
    Nominal(NominalVariable),
}

impl Variable {
    /// Column kind this descriptor accepts.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Fuzzy(_) => ColumnKind::Numeric,
            Self::Nominal(_) => ColumnKind::Nominal,
        }
    }

    /// Number of labels this descriptor exposes.
    pub fn label_count(&self) -> usize {
        match self {
            Self::Fuzzy(v) => v.label_count(),
            Self::Nominal(v) => v.label_count(),
        }
    }

    /// Best-matching label for `value`.
    ///
    /// `None` when the value has the wrong kind or is an unseen category.
    pub fn label_index(&self, value: &FeatureValue) -> Option<u32> {
        match (self, value) {
            (Self::Fuzzy(v), FeatureValue::Numeric(x)) => Some(v.label_index(*x)),
            (Self::Nominal(v), FeatureValue::Nominal(s)) => v.label_index(s),
            _ => None,
        }
    }

    /// Membership of `value` in `label`. A kind mismatch yields 0.0.
    pub fn membership(&self, label: u32, value: &FeatureValue) -> f64 {
        match (self, value) {
            (Self::Fuzzy(v), FeatureValue::Numeric(x)) => v.membership(label as usize, *x),
            (Self::Nominal(v), FeatureValue::Nominal(s)) => v.membership(label as usize, s),
            _ => 0.0,
        }
    }
}
