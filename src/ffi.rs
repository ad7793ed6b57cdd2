//! Python FFI bindings via PyO3.
//!
//! Exposes [`ChiClassifier`] to Python as `ChiRWClassifier` with the usual
//! estimator surface. Only numeric features cross the boundary; use the Rust
//! API for nominal columns.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from chi_frbcs import ChiRWClassifier
//!
//! clf = ChiRWClassifier(labels=3, frm="wr")
//! clf.fit([[0.0, 1.0], [0.1, 0.9], [1.9, 0.1], [2.0, 0.0]], [0, 0, 1, 1])
//! print(clf.predict([[0.05, 0.95]]))        # [0]
//! print(clf.predict_proba([[0.05, 0.95]]))  # raw scores, not normalised
//! print(clf.rule_count)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::classifier::ChiClassifier;
use crate::config::ChiConfig;
use crate::error::FrbcsError;
use crate::inference::InferenceStrategy;
use crate::variable::FeatureValue;

fn to_py_err(err: FrbcsError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn to_rows(x: Vec<Vec<f64>>) -> Vec<Vec<FeatureValue>> {
    x.into_iter()
        .map(|row| row.into_iter().map(FeatureValue::Numeric).collect())
        .collect()
}

// ── ChiRWClassifier ──────────────────────────────────────────────────────────

/// Chi fuzzy rule-based classifier with rule weights.
///
/// Args:
///     labels: fuzzy labels per feature, positive (default 3)
///     frm:    fuzzy reasoning method, "wr" (winning rule) or "ac"
///             (additive combination) (default "wr")
#[pyclass(name = "ChiRWClassifier")]
pub struct PyChiClassifier {
    inner: ChiClassifier,
}

#[pymethods]
impl PyChiClassifier {
    /// Create an unfitted classifier.
    #[new]
    #[pyo3(signature = (labels=3, frm="wr"))]
    pub fn new(labels: usize, frm: &str) -> PyResult<Self> {
        let strategy: InferenceStrategy = frm.parse().map_err(to_py_err)?;
        let config = ChiConfig::new().with_labels(labels).with_strategy(strategy);
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: ChiClassifier::new(config) })
    }

    /// Learn the rule base from a numeric matrix and integer class labels.
    pub fn fit(&mut self, x: Vec<Vec<f64>>, y: Vec<u32>) -> PyResult<()> {
        let rows = to_rows(x);
        self.inner.fit(&rows, &y).map_err(to_py_err)
    }

    /// Predicted class label per row.
    pub fn predict(&self, x: Vec<Vec<f64>>) -> PyResult<Vec<u32>> {
        self.inner.predict(&to_rows(x)).map_err(to_py_err)
    }

    /// Raw per-class scores per row, columns in `classes_` order.
    pub fn predict_proba(&self, x: Vec<Vec<f64>>) -> PyResult<Vec<Vec<f64>>> {
        self.inner.predict_proba(&to_rows(x)).map_err(to_py_err)
    }

    /// Fraction of rows predicted correctly.
    pub fn score(&self, x: Vec<Vec<f64>>, y: Vec<u32>) -> PyResult<f64> {
        self.inner.score(&to_rows(x), &y).map_err(to_py_err)
    }

    /// Training class labels in score-column order.
    #[getter]
    pub fn classes_(&self) -> PyResult<Vec<u32>> {
        self.inner
            .class_labels()
            .map(|set| set.labels().to_vec())
            .ok_or_else(|| to_py_err(FrbcsError::NotFitted))
    }

    /// Number of rules in the fitted rule base (0 when unfitted).
    #[getter]
    pub fn rule_count(&self) -> usize {
        self.inner.knowledge_base().map_or(0, |kb| kb.rule_base().len())
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let config = self.inner.config();
        let frm = match config.strategy {
            InferenceStrategy::WinningRule => "wr",
            InferenceStrategy::AdditiveCombination => "ac",
        };
        format!("ChiRWClassifier(labels={}, frm=\"{}\")", config.labels, frm)
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Chi fuzzy rule-based classification.
#[pymodule]
pub fn chi_frbcs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyChiClassifier>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
