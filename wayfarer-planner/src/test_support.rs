//! Test-only utilities for `wayfarer-planner`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use geo::Coord;
use wayfarer_core::Destination;

/// Golden angle in degrees, used to spread generated points evenly.
const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_85;

/// Generate `count` destinations spread over western Europe.
///
/// Points follow a sunflower spiral around a centre derived from `seed`, so
/// the same arguments always yield the same destinations. Identifiers are
/// `stop-0`, `stop-1`, and so on; popularity cycles through `0.2..=1.0`.
///
/// # Examples
/// ```rust
/// use wayfarer_planner::test_support::scattered_destinations;
///
/// let stops = scattered_destinations(4, 1);
/// assert_eq!(stops.len(), 4);
/// assert_eq!(stops[3].id, "stop-3");
/// assert_eq!(stops, scattered_destinations(4, 1));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "spiral placement uses floating-point trigonometry"
)]
pub fn scattered_destinations(count: usize, seed: u64) -> Vec<Destination> {
    let offset = f64::from(u32::try_from(seed.rem_euclid(360)).unwrap_or(0));
    (0..count)
        .map(|idx| {
            let step = f64::from(u32::try_from(idx).unwrap_or(u32::MAX));
            let angle = (offset + step * GOLDEN_ANGLE_DEG).to_radians();
            let radius = 0.6 * (step + 1.0).sqrt();
            let location = Coord {
                x: 8.0 + radius * angle.cos(),
                y: 47.0 + radius * angle.sin(),
            };
            let popularity = 0.2 + 0.2 * (step % 5.0);
            Destination::new(format!("stop-{idx}"), format!("Stop {idx}"), location)
                .with_popularity(popularity)
        })
        .collect()
}
