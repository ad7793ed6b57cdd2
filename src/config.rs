//! Classifier configuration.

use crate::error::{FrbcsError, Result};
use crate::inference::InferenceStrategy;

/// Default number of fuzzy labels per numeric feature.
pub const DEFAULT_LABELS: usize = 3;

/// Configuration for [`crate::classifier::ChiClassifier`].
///
/// ```rust
/// use chi_frbcs::config::ChiConfig;
/// use chi_frbcs::inference::InferenceStrategy;
///
/// let config = ChiConfig::default()
///     .with_labels(5)
///     .with_strategy(InferenceStrategy::AdditiveCombination);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChiConfig {
    /// Fuzzy labels per numeric feature. Must be positive; typically 3–7.
    /// Nominal features ignore it.
    pub labels: usize,
    /// Fuzzy reasoning method used by `predict` / `predict_proba`.
    pub strategy: InferenceStrategy,
}

impl ChiConfig {
    /// Default configuration: 3 labels, winning rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label count.
    pub fn with_labels(mut self, labels: usize) -> Self {
        self.labels = labels;
        self
    }

    /// Set the inference strategy.
    pub fn with_strategy(mut self, strategy: InferenceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject configurations that cannot train.
    pub fn validate(&self) -> Result<()> {
        if self.labels == 0 {
            return Err(FrbcsError::InvalidLabelCount { labels: self.labels });
        }
        Ok(())
    }
}

impl Default for ChiConfig {
    fn default() -> Self {
        Self { labels: DEFAULT_LABELS, strategy: InferenceStrategy::WinningRule }
    }
}
