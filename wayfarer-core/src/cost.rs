//! Transport cost estimates parameterised by travel style.

use crate::{TravelStyle, ValidationError};

/// Currency units per kilometre for a travel style.
///
/// # Examples
/// ```
/// use wayfarer_core::{TravelStyle, transport_rate_per_km};
///
/// assert_eq!(transport_rate_per_km(TravelStyle::Luxury), 0.50);
/// assert_eq!(transport_rate_per_km(TravelStyle::Backpacker), 0.10);
/// ```
#[must_use]
pub const fn transport_rate_per_km(style: TravelStyle) -> f64 {
    match style {
        TravelStyle::Luxury => 0.50,
        TravelStyle::Premium => 0.35,
        TravelStyle::Standard => 0.25,
        TravelStyle::Budget => 0.15,
        TravelStyle::Backpacker => 0.10,
    }
}

/// Estimated cost of covering `distance_km` in the given style.
///
/// # Errors
/// Returns [`ValidationError::NegativeDistance`] for a negative distance and
/// [`ValidationError::NonFiniteValue`] for NaN or infinite input.
///
/// # Examples
/// ```
/// use wayfarer_core::{TravelStyle, estimate_transport_cost};
///
/// let cost = estimate_transport_cost(400.0, TravelStyle::Standard)?;
/// assert!((cost - 100.0).abs() < 1e-9);
/// # Ok::<(), wayfarer_core::ValidationError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "cost is distance multiplied by a per-kilometre rate"
)]
pub fn estimate_transport_cost(distance_km: f64, style: TravelStyle) -> Result<f64, ValidationError> {
    if !distance_km.is_finite() {
        return Err(ValidationError::NonFiniteValue("distance"));
    }
    if distance_km < 0.0 {
        return Err(ValidationError::NegativeDistance(distance_km));
    }
    Ok(distance_km * transport_rate_per_km(style))
}
