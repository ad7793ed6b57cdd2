//! Rule weights and conflict resolution.
//!
//! Penalized Certainty Factor for class `c` at a candidate row:
//!
//! ```text
//! total     = Σ_k support[k]
//! PCF(c)    = (support[c] − (total − support[c])) / total
//! ```
//!
//! Only classes observed at the candidate's grid cell compete. The winner is
//! the class with the largest PCF, lowest class index on ties; the rule is
//! kept only if that PCF is strictly positive. A row with `total == 0` is
//! degenerate and yields no rule.

/// PCF of `class` in `support`, or `None` when the row has no support.
pub fn penalized_certainty_factor(support: &[f64], class: usize) -> Option<f64> {
    let total: f64 = support.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let own = support.get(class).copied().unwrap_or(0.0);
    let others = total - own;
    Some(((own - others) / total).min(1.0))
}

/// Pick the consequent class and weight for a candidate row.
///
/// `observed` must be sorted ascending; it is the set of classes seen at the
/// candidate's cell during grid covering. Returns `None` for a degenerate row
/// or when no observed class has a positive PCF.
pub fn resolve_conflict(support: &[f64], observed: &[usize]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for &class in observed {
        let weight = penalized_certainty_factor(support, class)?;
        if weight > best.map_or(0.0, |(_, w)| w) {
            best = Some((class, weight));
        }
    }
    best
}
