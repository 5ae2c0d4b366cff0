//! Bounded 2-opt improvement of an open path.
//!
//! For positions `i < j`, reversing `order[i..=j]` replaces the edges
//! `(order[i-1], order[i])` and `(order[j], order[j+1])` with
//! `(order[i-1], order[j])` and `(order[i], order[j+1])`. The edges inside
//! the segment only change direction, so the weights must be symmetric. At
//! either end of the path the missing neighbour contributes nothing.

use wayfarer_core::SearchCutoff;

use super::SearchBudget;
use crate::Matrix;

/// Minimum weight reduction for a reversal to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

pub(super) struct Improvement {
    pub(super) order: Vec<usize>,
    pub(super) passes: usize,
    pub(super) cutoff: Option<SearchCutoff>,
}

enum PassOutcome {
    Improved,
    Converged,
    Interrupted,
}

/// Apply first-improvement 2-opt passes until a pass changes nothing or the
/// budget runs out.
pub(super) fn improve(mut order: Vec<usize>, weights: &Matrix, budget: SearchBudget) -> Improvement {
    let mut passes = 0_usize;
    loop {
        if passes >= budget.max_passes() {
            return Improvement {
                order,
                passes,
                cutoff: Some(SearchCutoff::PassLimit),
            };
        }
        if budget.expired() {
            return Improvement {
                order,
                passes,
                cutoff: Some(SearchCutoff::Deadline),
            };
        }
        match run_pass(&mut order, weights, &budget) {
            PassOutcome::Improved => passes = passes.saturating_add(1),
            PassOutcome::Converged => {
                return Improvement {
                    order,
                    passes: passes.saturating_add(1),
                    cutoff: None,
                };
            }
            PassOutcome::Interrupted => {
                return Improvement {
                    order,
                    passes,
                    cutoff: Some(SearchCutoff::Deadline),
                };
            }
        }
    }
}

fn run_pass(order: &mut [usize], weights: &Matrix, budget: &SearchBudget) -> PassOutcome {
    let len = order.len();
    let mut improved = false;
    for i in 0..len.saturating_sub(1) {
        if budget.expired() {
            return PassOutcome::Interrupted;
        }
        for j in i.saturating_add(1)..len {
            if reversal_delta(order, weights, i, j) < -IMPROVEMENT_EPSILON {
                if let Some(segment) = order.get_mut(i..=j) {
                    segment.reverse();
                    improved = true;
                }
            }
        }
    }
    if improved {
        PassOutcome::Improved
    } else {
        PassOutcome::Converged
    }
}

/// Change in path weight from reversing `order[i..=j]`.
#[expect(
    clippy::float_arithmetic,
    reason = "delta is the difference between replaced and added edge weights"
)]
fn reversal_delta(order: &[usize], weights: &Matrix, i: usize, j: usize) -> f64 {
    let (Some(&first), Some(&last)) = (order.get(i), order.get(j)) else {
        return 0.0;
    };
    let before = i.checked_sub(1).and_then(|idx| order.get(idx)).copied();
    let after = j.checked_add(1).and_then(|idx| order.get(idx)).copied();
    let edge = |from: Option<usize>, to: Option<usize>| match (from, to) {
        (Some(from), Some(to)) => weights.get(from, to),
        _ => 0.0,
    };
    let removed = edge(before, Some(first)) + edge(Some(last), after);
    let added = edge(before, Some(last)) + edge(Some(first), after);
    added - removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(xs: &[f64]) -> Matrix {
        let mut weights = Matrix::zeros(xs.len());
        for (i, a) in xs.iter().enumerate() {
            for (j, b) in xs.iter().enumerate() {
                #[expect(clippy::float_arithmetic, reason = "test distances")]
                weights.set(i, j, (a - b).abs());
            }
        }
        weights
    }

    #[rstest]
    fn reversal_uncrosses_a_path() {
        // 0 -> 2 -> 1 -> 3 on a line crosses itself; reversing [1..=2] fixes it.
        let weights = line(&[0.0, 1.0, 2.0, 3.0]);
        let delta = reversal_delta(&[0, 2, 1, 3], &weights, 1, 2);
        assert!((delta + 2.0).abs() < 1e-12, "delta was {delta}");
    }

    #[rstest]
    fn full_reversal_is_neutral() {
        let weights = line(&[0.0, 5.0, 1.0]);
        assert_eq!(reversal_delta(&[0, 1, 2], &weights, 0, 2), 0.0);
    }

    #[rstest]
    fn improve_converges_on_a_line() {
        let weights = line(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let result = improve(vec![0, 3, 1, 4, 2], &weights, SearchBudget::passes(25));
        assert!(result.cutoff.is_none());
        assert!((weights.path_weight(&result.order) - 4.0).abs() < 1e-12);
    }

    #[rstest]
    fn pass_cap_marks_the_result() {
        let weights = line(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = improve(vec![0, 5, 1, 4, 2, 3], &weights, SearchBudget::passes(1));
        assert_eq!(result.passes, 1);
        assert_eq!(result.cutoff, Some(SearchCutoff::PassLimit));
    }

    #[rstest]
    #[case(1, Some(SearchCutoff::PassLimit))]
    #[case(2, None)]
    fn last_improving_pass_is_not_confirmed(
        #[case] cap: usize,
        #[case] cutoff: Option<SearchCutoff>,
    ) {
        let weights = line(&[0.0, 1.0, 2.0, 3.0]);
        let result = improve(vec![0, 2, 1, 3], &weights, SearchBudget::passes(cap));
        assert_eq!(result.order, vec![0, 1, 2, 3]);
        assert_eq!(result.passes, cap);
        assert_eq!(result.cutoff, cutoff);
    }

    #[rstest]
    fn expired_deadline_stops_before_the_first_pass() {
        let weights = line(&[0.0, 2.0, 1.0]);
        let budget = SearchBudget::for_size(3, None, Some(std::time::Duration::ZERO));
        let result = improve(vec![0, 1, 2], &weights, budget);
        assert_eq!(result.passes, 0);
        assert_eq!(result.cutoff, Some(SearchCutoff::Deadline));
        assert_eq!(result.order, vec![0, 1, 2]);
    }
}
