//! Open-path visiting-order search.
//!
//! The order is built greedily by nearest neighbour from the first
//! destination, then improved with 2-opt segment reversals. The 2-opt phase
//! runs under a [`SearchBudget`]: when the pass cap or the deadline is reached
//! the best tour found so far is returned and the cutoff is recorded.

mod two_opt;

use std::time::{Duration, Instant};

use wayfarer_core::SearchCutoff;

use crate::Matrix;

/// Limits on the 2-opt improvement phase.
///
/// A pass that finds no improving reversal ends the search without a cutoff.
/// The pass cap is checked before each pass starts, so when the last allowed
/// pass still improves the tour, no confirming pass runs and the result
/// carries [`SearchCutoff::PassLimit`] even if it is already a local optimum.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use wayfarer_planner::SearchBudget;
///
/// let budget = SearchBudget::for_size(5, None, Some(Duration::from_millis(100)));
/// assert_eq!(budget.max_passes(), 25);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    max_passes: usize,
    deadline: Option<Instant>,
}

impl SearchBudget {
    /// Budget for a tour over `size` destinations, starting now.
    ///
    /// Without an explicit `max_passes` the cap is `size²`. The cap is never
    /// below one pass.
    #[must_use]
    pub fn for_size(size: usize, max_passes: Option<usize>, time_limit: Option<Duration>) -> Self {
        let max_passes = max_passes
            .unwrap_or_else(|| size.saturating_mul(size))
            .max(1);
        let deadline = time_limit.and_then(|limit| Instant::now().checked_add(limit));
        Self {
            max_passes,
            deadline,
        }
    }

    /// A budget with no deadline and the given pass cap.
    #[must_use]
    pub fn passes(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
            deadline: None,
        }
    }

    /// Maximum number of full 2-opt passes.
    #[must_use]
    pub const fn max_passes(&self) -> usize {
        self.max_passes
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Result of the visiting-order search.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSolution {
    /// Permutation of input indices in visiting order.
    pub order: Vec<usize>,
    /// Weight of `order` as an open path.
    pub weight: f64,
    /// Weight of the nearest-neighbour tour before improvement.
    pub nearest_neighbor_weight: f64,
    /// Completed 2-opt passes.
    pub passes: usize,
    /// Set when the improvement phase stopped before converging.
    pub cutoff: Option<SearchCutoff>,
}

impl RouteSolution {
    /// Whether the order came from an interrupted search.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        self.cutoff.is_some()
    }
}

/// Find a low-weight open-path order over the destinations of `weights`.
///
/// Two or fewer destinations keep their input order.
///
/// # Examples
/// ```
/// use wayfarer_planner::{Matrix, SearchBudget, solve_order};
///
/// // Points on a line at 0, 3, 1, 2: the best open path is 0, 2, 3, 1.
/// let xs = [0.0_f64, 3.0, 1.0, 2.0];
/// let mut weights = Matrix::zeros(4);
/// for (i, a) in xs.iter().enumerate() {
///     for (j, b) in xs.iter().enumerate() {
///         weights.set(i, j, (a - b).abs());
///     }
/// }
/// let solution = solve_order(&weights, SearchBudget::passes(16));
/// assert_eq!(solution.order, vec![0, 2, 3, 1]);
/// assert!((solution.weight - 3.0).abs() < 1e-12);
/// assert!(solution.cutoff.is_none());
/// ```
#[must_use]
pub fn solve_order(weights: &Matrix, budget: SearchBudget) -> RouteSolution {
    let size = weights.size();
    if size <= 2 {
        let order: Vec<usize> = (0..size).collect();
        let weight = weights.path_weight(&order);
        return RouteSolution {
            order,
            weight,
            nearest_neighbor_weight: weight,
            passes: 0,
            cutoff: None,
        };
    }

    let initial = nearest_neighbor(weights);
    let nearest_neighbor_weight = weights.path_weight(&initial);
    log::debug!("nearest-neighbour tour over {size} stops weighs {nearest_neighbor_weight:.6}");

    let improved = two_opt::improve(initial.clone(), weights, budget);
    let improved_weight = weights.path_weight(&improved.order);
    if let Some(cutoff) = improved.cutoff {
        log::warn!(
            "2-opt stopped early ({cutoff:?}) after {} passes; returning best tour so far",
            improved.passes
        );
    }

    let (order, weight) = if improved_weight <= nearest_neighbor_weight {
        (improved.order, improved_weight)
    } else {
        debug_assert!(false, "2-opt must never worsen the tour");
        (initial, nearest_neighbor_weight)
    };
    RouteSolution {
        order,
        weight,
        nearest_neighbor_weight,
        passes: improved.passes,
        cutoff: improved.cutoff,
    }
}

/// Greedy open path from index 0, always extending to the cheapest unvisited
/// index. Ties go to the lowest index.
fn nearest_neighbor(weights: &Matrix) -> Vec<usize> {
    let size = weights.size();
    let mut visited = vec![false; size];
    let mut order = Vec::with_capacity(size);
    let mut current = 0_usize;
    if let Some(flag) = visited.get_mut(current) {
        *flag = true;
    }
    order.push(current);

    while order.len() < size {
        let next = visited
            .iter()
            .enumerate()
            .filter(|(_, seen)| !**seen)
            .map(|(idx, _)| (idx, weights.get(current, idx)))
            .fold(None, |best: Option<(usize, f64)>, (idx, weight)| match best {
                Some((_, best_weight)) if best_weight <= weight => best,
                _ => Some((idx, weight)),
            });
        let Some((idx, _)) = next else {
            break;
        };
        if let Some(flag) = visited.get_mut(idx) {
            *flag = true;
        }
        order.push(idx);
        current = idx;
    }
    order
}
