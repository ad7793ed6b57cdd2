//! Fuzzy reasoning methods: winning rule and additive combination.
//!
//! Both strategies consume per-rule activations `(class, degree × weight)`
//! and fold them into a class score vector in the training class order.
//!
//! | Strategy | Per-class fold | Effect |
//! |----------|----------------|--------|
//! | [`InferenceStrategy::WinningRule`] | max | one strong rule cannot be outvoted by many weak ones |
//! | [`InferenceStrategy::AdditiveCombination`] | sum | every firing rule contributes a vote |
//!
//! Scores are raw and unnormalised; they are not probabilities.

use core::fmt;
use core::str::FromStr;

use crate::error::FrbcsError;

/// Which fuzzy reasoning method turns rule activations into class scores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum InferenceStrategy {
    /// Per class, keep the single best activation.
    #[default]
    WinningRule,
    /// Per class, sum all activations.
    AdditiveCombination,
}

impl InferenceStrategy {
    /// Canonical name: `winning-rule` or `additive-combination`.
    pub fn name(self) -> &'static str {
        match self {
            Self::WinningRule => "winning-rule",
            Self::AdditiveCombination => "additive-combination",
        }
    }

    /// Fold `(class, score)` activations into a vector of `class_count` scores.
    ///
    /// Activations for classes outside `0..class_count` are ignored.
    pub fn aggregate<I>(self, activations: I, class_count: usize) -> Vec<f64>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut scores = vec![0.0; class_count];
        for (class, score) in activations {
            let Some(slot) = scores.get_mut(class) else { continue };
            match self {
                Self::WinningRule => {
                    if score > *slot {
                        *slot = score;
                    }
                }
                Self::AdditiveCombination => *slot += score,
            }
        }
        scores
    }
}

impl fmt::Display for InferenceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InferenceStrategy {
    type Err = FrbcsError;

    /// Accepts the canonical names and the short forms `wr` / `ac`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winning-rule" | "wr" => Ok(Self::WinningRule),
            "additive-combination" | "ac" => Ok(Self::AdditiveCombination),
            _ => Err(FrbcsError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// Index of the largest score; the lowest index wins ties.
///
/// An all-zero (or empty) vector resolves to class 0.
pub fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}
