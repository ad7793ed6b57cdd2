//! # chi-frbcs
//!
//! Chi-style fuzzy rule-based classification with rule weights.
//!
//! ---
//!
//! ## Two phases, one knowledge base
//!
//! **Learning** partitions every numeric feature into uniform triangular fuzzy
//! labels and treats every categorical feature as a set of crisp labels. Each
//! training example is fingerprinted by its best-matching label per feature;
//! each distinct fingerprint is a candidate rule. Every candidate is scored
//! against every training example, and the Penalized Certainty Factor picks
//! its consequent class and weight. Candidates whose weight is not positive
//! are dropped.
//!
//! **Inference** matches a new example against every rule (product t-norm),
//! scales by the rule weight, and folds per class:
//! > Winning rule keeps the best. Additive combination sums them.
//!
//! ## The pipeline
//!
//! ```text
//! training rows ─▶ VariableRegistry ─▶ CandidateTable ─▶ MatchingAccumulator ─▶ RuleBase
//!                   (fingerprint)       (antecedent →      [candidate × class]     (PCF > 0)
//!                                        class set)
//!
//! new row ─▶ VariableRegistry::matching_degree × weight ─▶ InferenceStrategy ─▶ argmax
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`variable`] | [`FeatureValue`], [`FuzzyVariable`], [`NominalVariable`] | Per-column label sets and membership |
//! | [`registry`] | [`VariableRegistry`], [`Antecedent`] | Schema, fingerprints, product matching degree |
//! | [`rule`] | [`FuzzyRule`], [`RuleBase`] | Immutable weighted rules |
//! | [`candidate`] | [`CandidateTable`] | Grid-covering candidate collection in first-seen order |
//! | [`accumulator`] | [`MatchingAccumulator`] | Dense candidate × class support sums |
//! | [`weight`] | [`resolve_conflict`] | Penalized Certainty Factor and conflict resolution |
//! | [`inference`] | [`InferenceStrategy`] | Winning rule / additive combination |
//! | [`knowledge`] | [`KnowledgeBase`], [`GenerationObserver`] | Generation engine and batch inference |
//! | [`classifier`] | [`ChiClassifier`], [`ClassLabelSet`] | `fit` / `predict` / `predict_proba` / `score` |
//! | [`config`] | [`ChiConfig`] | Label count and default strategy |
//! | `snapshot` | `KnowledgeBaseSnapshot` | Serialisable fitted model (requires `serde` feature) |
//!
//! ## Features
//!
//! - `serde`: serialisation of configs, values and `snapshot` records.
//! - `parallel`: candidate rows of the accumulator and batch prediction run on `rayon`.
//! - `python-ffi`: PyO3 bindings exposing `ChiRWClassifier`.
//!
//! ## License
//!
//! Business Source License 1.1. Free for evaluation and non-production use.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod accumulator;
pub mod candidate;
pub mod classifier;
pub mod config;
pub mod error;
pub mod inference;
pub mod knowledge;
pub mod registry;
pub mod rule;
pub mod variable;
pub mod weight;

#[cfg(feature = "serde")]
pub mod snapshot;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use accumulator::MatchingAccumulator;
pub use candidate::{Candidate, CandidateTable};
pub use classifier::{ChiClassifier, ClassLabelSet};
pub use config::ChiConfig;
pub use error::{FrbcsError, Result};
pub use inference::{argmax, InferenceStrategy};
pub use knowledge::{GenerationObserver, GenerationPhase, KnowledgeBase, TracingObserver};
pub use registry::{Antecedent, VariableRegistry};
pub use rule::{FuzzyRule, RuleBase};
pub use variable::{ColumnKind, FeatureValue, FuzzyVariable, NominalVariable, TriangularSet, Variable};
pub use weight::{penalized_certainty_factor, resolve_conflict};

#[cfg(feature = "serde")]
pub use snapshot::{KnowledgeBaseSnapshot, RuleRecord, VariableRecord, SNAPSHOT_VERSION};
