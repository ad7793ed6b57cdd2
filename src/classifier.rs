//! Estimator wrapper: `fit` / `predict` / `predict_proba` / `score`.
//!
//! [`ChiClassifier`] owns the configuration, maps user class labels to dense
//! class indices through a [`ClassLabelSet`], and delegates the work to a
//! [`KnowledgeBase`].
//!
//! ```rust
//! use chi_frbcs::classifier::ChiClassifier;
//! use chi_frbcs::config::ChiConfig;
//! use chi_frbcs::variable::FeatureValue;
//!
//! let x: Vec<Vec<FeatureValue>> = [0.0, 0.2, 1.8, 2.0]
//!     .iter()
//!     .map(|&v| vec![FeatureValue::Numeric(v)])
//!     .collect();
//! let y = [10, 10, 20, 20];
//!
//! let mut chi = ChiClassifier::new(ChiConfig::default());
//! chi.fit(&x, &y).unwrap();
//! assert_eq!(chi.predict(&x).unwrap(), vec![10, 10, 20, 20]);
//! ```

use crate::config::ChiConfig;
use crate::error::{FrbcsError, Result};
use crate::inference::InferenceStrategy;
use crate::knowledge::{GenerationObserver, KnowledgeBase, TracingObserver};
use crate::registry::VariableRegistry;
use crate::variable::FeatureValue;

// ─── Class label set ────────────────────────────────────────────────────────

/// Distinct training class labels in ascending order.
///
/// Position in the set is the class index used by rules and score vectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassLabelSet {
    labels: Vec<u32>,
}

impl ClassLabelSet {
    /// Sorted unique labels of `y`.
    pub fn from_labels(y: &[u32]) -> Self {
        let mut labels = y.to_vec();
        labels.sort_unstable();
        labels.dedup();
        Self { labels }
    }

    /// Wrap labels that are already sorted and unique (used on restore).
    pub fn from_sorted(labels: Vec<u32>) -> Option<Self> {
        labels
            .windows(2)
            .all(|w| w[0] < w[1])
            .then_some(Self { labels })
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `true` when no label is present.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in class-index order.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Class index of `label`.
    pub fn index_of(&self, label: u32) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Label of class index `index`.
    pub fn label(&self, index: usize) -> Option<u32> {
        self.labels.get(index).copied()
    }
}

// ─── Classifier ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct Fitted {
    class_labels: ClassLabelSet,
    knowledge_base: KnowledgeBase,
}

/// Chi fuzzy rule-based classifier with rule weights.
#[derive(Clone, Debug, PartialEq)]
pub struct ChiClassifier {
    config: ChiConfig,
    fitted: Option<Fitted>,
}

impl ChiClassifier {
    /// An unfitted classifier.
    pub fn new(config: ChiConfig) -> Self {
        Self { config, fitted: None }
    }

    /// Rebuild a fitted classifier from a restored knowledge base.
    pub fn from_parts(
        config: ChiConfig,
        class_labels: ClassLabelSet,
        knowledge_base: KnowledgeBase,
    ) -> Self {
        Self { config, fitted: Some(Fitted { class_labels, knowledge_base }) }
    }

    /// Active configuration.
    pub fn config(&self) -> &ChiConfig {
        &self.config
    }

    /// Change the inference strategy used by subsequent predictions.
    pub fn set_strategy(&mut self, strategy: InferenceStrategy) {
        self.config.strategy = strategy;
    }

    /// `true` once `fit` has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The learned knowledge base, if fitted.
    pub fn knowledge_base(&self) -> Option<&KnowledgeBase> {
        self.fitted.as_ref().map(|f| &f.knowledge_base)
    }

    /// The training class labels, if fitted.
    pub fn class_labels(&self) -> Option<&ClassLabelSet> {
        self.fitted.as_ref().map(|f| &f.class_labels)
    }

    /// Learn the knowledge base from `x` and `y`, logging via `tracing`.
    ///
    /// Replaces any previous fit. On error the classifier keeps its prior state.
    pub fn fit<R>(&mut self, x: &[R], y: &[u32]) -> Result<()>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        self.fit_with_observer(x, y, &mut TracingObserver)
    }

    /// [`fit`](Self::fit) with a custom progress observer.
    pub fn fit_with_observer<R>(
        &mut self,
        x: &[R],
        y: &[u32],
        observer: &mut dyn GenerationObserver,
    ) -> Result<()>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        self.config.validate()?;
        if x.is_empty() {
            return Err(FrbcsError::EmptyTrainingSet);
        }
        if x.len() != y.len() {
            return Err(FrbcsError::LabelCountMismatch { examples: x.len(), labels: y.len() });
        }

        let registry = VariableRegistry::from_training(x, self.config.labels)?;
        let class_labels = ClassLabelSet::from_labels(y);
        let classes: Vec<usize> = y
            .iter()
            .filter_map(|&label| class_labels.index_of(label))
            .collect();

        let knowledge_base = KnowledgeBase::generate_with_observer(
            registry,
            x,
            &classes,
            class_labels.len(),
            observer,
        )?;
        self.fitted = Some(Fitted { class_labels, knowledge_base });
        Ok(())
    }

    /// Predicted class label per row.
    pub fn predict<R>(&self, x: &[R]) -> Result<Vec<u32>>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        self.predict_with(x, self.config.strategy)
    }

    /// Predicted class label per row using an explicit strategy.
    pub fn predict_with<R>(&self, x: &[R], strategy: InferenceStrategy) -> Result<Vec<u32>>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        let fitted = self.fitted.as_ref().ok_or(FrbcsError::NotFitted)?;
        let indices = fitted.knowledge_base.predict(x, strategy)?;
        Ok(indices
            .into_iter()
            .map(|i| fitted.class_labels.label(i).unwrap_or_default())
            .collect())
    }

    /// Raw per-class scores per row, columns in [`ClassLabelSet`] order.
    ///
    /// Scores are not normalised and are not calibrated probabilities.
    pub fn predict_proba<R>(&self, x: &[R]) -> Result<Vec<Vec<f64>>>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        self.predict_proba_with(x, self.config.strategy)
    }

    /// Raw per-class scores per row using an explicit strategy.
    pub fn predict_proba_with<R>(&self, x: &[R], strategy: InferenceStrategy) -> Result<Vec<Vec<f64>>>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        let fitted = self.fitted.as_ref().ok_or(FrbcsError::NotFitted)?;
        fitted.knowledge_base.predict_scores(x, strategy)
    }

    /// Fraction of rows whose predicted label equals `y`.
    pub fn score<R>(&self, x: &[R], y: &[u32]) -> Result<f64>
    where
        R: AsRef<[FeatureValue]> + Sync,
    {
        if x.len() != y.len() {
            return Err(FrbcsError::LabelCountMismatch { examples: x.len(), labels: y.len() });
        }
        if x.is_empty() {
            return Ok(0.0);
        }
        let predicted = self.predict(x)?;
        let hits = predicted.iter().zip(y).filter(|(p, t)| p == t).count();
        Ok(hits as f64 / y.len() as f64)
    }
}

impl Default for ChiClassifier {
    fn default() -> Self {
        Self::new(ChiConfig::default())
    }
}
