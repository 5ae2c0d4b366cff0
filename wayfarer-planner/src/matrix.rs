//! Dense pairwise matrices over a destination list.
//!
//! [`RouteMatrices`] holds the raw distance matrix used for travel legs and
//! the combined weight matrix the visiting-order search minimises.

use wayfarer_core::{
    BudgetFlexibility, DataError, Destination, TripPreferences, estimate_transport_cost,
    haversine_km,
};

/// Share of the weight given to cost when the budget is strict.
const STRICT_COST_WEIGHT: f64 = 0.7;
/// Share of the weight given to cost otherwise.
const RELAXED_COST_WEIGHT: f64 = 0.3;

/// A dense `n × n` matrix stored in row-major order.
///
/// # Examples
/// ```
/// use wayfarer_planner::Matrix;
///
/// let mut matrix = Matrix::zeros(2);
/// matrix.set(0, 1, 3.5);
/// assert_eq!(matrix.get(0, 1), 3.5);
/// assert_eq!(matrix.get(1, 0), 0.0);
/// assert_eq!(matrix.max(), 3.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    size: usize,
}

impl Matrix {
    /// A `size × size` matrix of zeros.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size.saturating_mul(size)],
            size,
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Entry at `(from, to)`.
    ///
    /// Out-of-range lookups are a logic error: they are logged, trip a debug
    /// assertion and read as zero in release builds.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        let value = self
            .offset(from, to)
            .and_then(|offset| self.data.get(offset))
            .copied();
        value.unwrap_or_else(|| {
            log::warn!(
                "matrix lookup ({from}, {to}) outside {size}x{size}; reading zero",
                size = self.size
            );
            debug_assert!(false, "matrix lookup ({from}, {to}) out of range");
            0.0
        })
    }

    /// Overwrite the entry at `(from, to)`. Out-of-range writes are ignored.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        let slot = self
            .offset(from, to)
            .and_then(|offset| self.data.get_mut(offset));
        if let Some(slot) = slot {
            *slot = value;
        } else {
            debug_assert!(false, "matrix write ({from}, {to}) out of range");
        }
    }

    /// Largest entry, or zero for an empty matrix.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Divide every entry by the largest one.
    ///
    /// A matrix whose maximum is zero (one destination, or every destination
    /// at the same place) is left untouched.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "normalisation divides by the maximum entry"
    )]
    pub fn normalized(&self) -> Self {
        let max = self.max();
        if max <= 0.0 {
            return self.clone();
        }
        Self {
            data: self.data.iter().map(|value| value / max).collect(),
            size: self.size,
        }
    }

    /// Total weight of visiting `order` as an open path.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "path weight is a sum of edges")]
    pub fn path_weight(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(self.get(*from, *to)),
                _ => None,
            })
            .sum()
    }

    fn offset(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.size || to >= self.size {
            return None;
        }
        from.checked_mul(self.size)?.checked_add(to)
    }
}

/// Distance, cost and weight matrices for one request.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{Destination, TripPreferences};
/// use wayfarer_planner::RouteMatrices;
///
/// let stops = [
///     Destination::new("a", "A", Coord { x: 0.0, y: 0.0 }),
///     Destination::new("b", "B", Coord { x: 1.0, y: 0.0 }),
///     Destination::new("c", "C", Coord { x: 3.0, y: 0.0 }),
/// ];
/// let prefs = TripPreferences::new(1000.0, "EUR", 3);
/// let matrices = RouteMatrices::build(&stops, &prefs)?;
/// assert_eq!(matrices.len(), 3);
/// assert!((matrices.weight().get(0, 2) - 1.0).abs() < 1e-12);
/// # Ok::<(), wayfarer_core::DataError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatrices {
    distance_km: Matrix,
    cost: Matrix,
    weight: Matrix,
}

impl RouteMatrices {
    /// Build the matrices for `destinations` in caller order.
    ///
    /// # Errors
    /// Returns the [`Destination::validate`] error of the first destination
    /// whose coordinates, popularity, daily cost or attractions are unusable.
    pub fn build(
        destinations: &[Destination],
        preferences: &TripPreferences,
    ) -> Result<Self, DataError> {
        for destination in destinations {
            destination.validate()?;
        }

        let size = destinations.len();
        let mut distance_km = Matrix::zeros(size);
        let mut cost = Matrix::zeros(size);
        for (i, from) in destinations.iter().enumerate() {
            for (j, to) in destinations.iter().enumerate().skip(i.saturating_add(1)) {
                let km = haversine_km(from.location, to.location)
                    .map_err(|_| invalid_coordinates(from))?;
                let fare = estimate_transport_cost(km, preferences.travel_style)
                    .map_err(|_| invalid_coordinates(from))?;
                distance_km.set(i, j, km);
                distance_km.set(j, i, km);
                cost.set(i, j, fare);
                cost.set(j, i, fare);
            }
        }

        let weight = combine(
            &distance_km.normalized(),
            &cost.normalized(),
            cost_weight(preferences.budget.flexibility),
        );
        log::debug!(
            "built {size}x{size} route matrices (max distance {:.1} km)",
            distance_km.max()
        );
        Ok(Self {
            distance_km,
            cost,
            weight,
        })
    }

    /// Number of destinations covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.weight.size()
    }

    /// Whether the matrices cover no destinations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Great-circle distances in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> &Matrix {
        &self.distance_km
    }

    /// Transport cost estimates in trip currency.
    #[must_use]
    pub const fn cost(&self) -> &Matrix {
        &self.cost
    }

    /// Combined normalised weights minimised by the order search.
    #[must_use]
    pub const fn weight(&self) -> &Matrix {
        &self.weight
    }
}

/// Weight given to cost for a budget flexibility tier.
const fn cost_weight(flexibility: BudgetFlexibility) -> f64 {
    match flexibility {
        BudgetFlexibility::Strict => STRICT_COST_WEIGHT,
        BudgetFlexibility::Moderate | BudgetFlexibility::Flexible => RELAXED_COST_WEIGHT,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "weights are a convex combination of normalised matrices"
)]
fn combine(distance: &Matrix, cost: &Matrix, cost_weight: f64) -> Matrix {
    let distance_weight = 1.0 - cost_weight;
    let size = distance.size();
    let mut weight = Matrix::zeros(size);
    for i in 0..size {
        for j in 0..size {
            weight.set(
                i,
                j,
                distance.get(i, j) * distance_weight + cost.get(i, j) * cost_weight,
            );
        }
    }
    weight
}

fn invalid_coordinates(destination: &Destination) -> DataError {
    DataError::InvalidCoordinates {
        id: destination.id.clone(),
        name: destination.name.clone(),
    }
}
