//! Equality-within-tolerance and Pareto dominance over performance vectors

use crate::criteria::criterion::Criteria;

/// Component-wise equality of the first `count` values within `epsilon`
///
/// Values are equal when `|a - b| <= epsilon` for every compared component.
pub fn values_equal(a: &[f64], b: &[f64], count: usize, epsilon: f64) -> bool {
    a.iter()
        .zip(b.iter())
        .take(count)
        .all(|(x, y)| (x - y).abs() <= epsilon)
}

/// Check if `a` Pareto-dominates `b` under the criteria's gain/cost directions
///
/// `a` dominates `b` when it is at least as good on every criterion and
/// strictly better on at least one.
pub fn dominates(a: &[f64], b: &[f64], criteria: &Criteria) -> bool {
    let mut strictly_better = false;
    for criterion in criteria {
        let id = criterion.id();
        let (x, y) = if criterion.is_gain() {
            (a[id], b[id])
        } else {
            (-a[id], -b[id])
        };
        if x < y {
            return false;
        }
        if x > y {
            strictly_better = true;
        }
    }
    strictly_better
}
