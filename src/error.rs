//! Crate error type.
//!
//! Every variant is a configuration or input-shape failure detected before any
//! training or inference work starts. Degenerate accumulator rows are not
//! errors; they simply produce no rule.

use thiserror::Error;

/// Errors reported by the knowledge-base engine and the classifier wrapper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrbcsError {
    /// `fit` was called with zero training examples.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// The fuzzy partition label count must be a positive integer.
    #[error("label count must be positive, got {labels}")]
    InvalidLabelCount {
        /// The rejected label count.
        labels: usize,
    },

    /// The example table and the class label vector differ in length.
    #[error("{examples} training examples but {labels} class labels")]
    LabelCountMismatch {
        /// Number of example rows.
        examples: usize,
        /// Number of class labels.
        labels: usize,
    },

    /// A training class index is not below the declared class count.
    #[error("row {row}: class index {class} out of range for {class_count} classes")]
    ClassOutOfRange {
        /// Index of the offending row.
        row: usize,
        /// The rejected class index.
        class: usize,
        /// Declared number of classes.
        class_count: usize,
    },

    /// A row does not have the same number of features as the training schema.
    #[error("row {row} has {found} features, expected {expected}")]
    FeatureCountMismatch {
        /// Index of the offending row.
        row: usize,
        /// Feature count of the schema.
        expected: usize,
        /// Feature count of the row.
        found: usize,
    },

    /// A training column mixes numeric and categorical values.
    #[error("column {column} mixes numeric and nominal values")]
    MixedColumnKind {
        /// Index of the offending column.
        column: usize,
    },

    /// A value's kind does not match the column kind fixed at training time.
    #[error("row {row}, column {column}: expected a {expected} value")]
    ColumnKindMismatch {
        /// Index of the offending row.
        row: usize,
        /// Index of the offending column.
        column: usize,
        /// Human-readable name of the expected kind.
        expected: &'static str,
    },

    /// A numeric feature value is NaN or infinite.
    #[error("row {row}, column {column}: numeric value is not finite")]
    NonFiniteValue {
        /// Index of the offending row.
        row: usize,
        /// Index of the offending column.
        column: usize,
    },

    /// Prediction was requested from a classifier that has not been fitted.
    #[error("classifier has not been fitted")]
    NotFitted,

    /// Unrecognised inference strategy name.
    #[error("unknown inference strategy `{0}` (expected `winning-rule` or `additive-combination`)")]
    UnknownStrategy(String),

    /// A persisted snapshot was written by an incompatible format version.
    #[error("snapshot version {found} is not supported (expected {supported})")]
    UnsupportedSnapshotVersion {
        /// Version found in the snapshot.
        found: u16,
        /// Version this build reads.
        supported: u16,
    },

    /// A persisted snapshot is internally inconsistent.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FrbcsError>;
