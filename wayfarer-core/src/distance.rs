//! Great-circle distance between coordinate pairs.

use geo::{Coord, Distance, Haversine, Point};

use crate::ValidationError;

/// Whether `location` is a finite WGS84 coordinate within range.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::is_valid_location;
///
/// assert!(is_valid_location(Coord { x: 2.35, y: 48.85 }));
/// assert!(!is_valid_location(Coord { x: 2.35, y: 91.0 }));
/// assert!(!is_valid_location(Coord { x: f64::NAN, y: 0.0 }));
/// ```
#[must_use]
pub fn is_valid_location(location: Coord<f64>) -> bool {
    location.x.is_finite()
        && location.y.is_finite()
        && (-180.0..=180.0).contains(&location.x)
        && (-90.0..=90.0).contains(&location.y)
}

/// Haversine distance in kilometres between two positions.
///
/// The result is exactly symmetric and exactly zero for identical points.
///
/// # Errors
/// Returns [`ValidationError::NonFiniteCoordinate`] when either position has a
/// NaN or infinite component.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::haversine_km;
///
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let lyon = Coord { x: 4.8357, y: 45.7640 };
/// let km = haversine_km(paris, lyon)?;
/// assert!((km - 392.0).abs() < 2.0);
/// assert_eq!(haversine_km(lyon, paris)?, km);
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "metres to kilometres conversion"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> Result<f64, ValidationError> {
    for coord in [from, to] {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate {
                latitude: coord.y,
                longitude: coord.x,
            });
        }
    }
    if from == to {
        return Ok(0.0);
    }
    // Evaluate in a canonical order so swapping the arguments cannot change
    // the rounding.
    let (a, b) = if (from.y, from.x) <= (to.y, to.x) {
        (from, to)
    } else {
        (to, from)
    };
    let metres = Haversine.distance(Point::from(a), Point::from(b));
    Ok(metres / 1000.0)
}
