//! Test-only, in-memory `DestinationRepository` and sample data used by unit
//! and behaviour tests.

use std::collections::HashMap;

use geo::Coord;

use crate::{Accessibility, Attraction, Destination, DestinationRepository, HubKind};

/// In-memory [`DestinationRepository`] keyed by destination identifier.
#[derive(Default, Debug, Clone)]
pub struct MemoryRepository {
    destinations: HashMap<String, Destination>,
}

impl MemoryRepository {
    /// Create a repository containing a single destination.
    pub fn with_destination(destination: Destination) -> Self {
        Self::with_destinations(std::iter::once(destination))
    }

    /// Create a repository from a collection of destinations.
    pub fn with_destinations<I>(destinations: I) -> Self
    where
        I: IntoIterator<Item = Destination>,
    {
        Self {
            destinations: destinations
                .into_iter()
                .map(|destination| (destination.id.clone(), destination))
                .collect(),
        }
    }
}

impl DestinationRepository for MemoryRepository {
    fn get_destination(&self, id: &str) -> Option<Destination> {
        self.destinations.get(id).cloned()
    }
}

/// Build an attraction with the fields the scheduler reads.
pub fn attraction(
    id: &str,
    category: &str,
    rating: f64,
    duration_minutes: u16,
    cost: f64,
) -> Attraction {
    Attraction::new(id, category, Coord { x: 0.0, y: 0.0 })
        .with_rating(rating)
        .with_duration_minutes(duration_minutes)
        .with_cost(cost)
        .with_accessibility(Accessibility::FULL)
}

/// Build a destination at `(longitude, latitude)` with the given popularity.
pub fn destination(id: &str, longitude: f64, latitude: f64, popularity: f64) -> Destination {
    Destination::new(id, id, Coord {
        x: longitude,
        y: latitude,
    })
    .with_popularity(popularity)
}

/// Paris with an airport, a station and a handful of attractions.
pub fn paris() -> Destination {
    let centre = Coord { x: 2.3522, y: 48.8566 };
    Destination::new("paris", "Paris", centre)
        .with_category("urban")
        .with_popularity(0.95)
        .with_average_daily_cost(220.0)
        .with_hub("CDG", HubKind::Airport, Coord { x: 2.55, y: 49.0097 })
        .with_hub("Gare de Lyon", HubKind::TrainStation, Coord { x: 2.3733, y: 48.8443 })
        .with_attraction(located(attraction("louvre", "museum", 4.8, 180, 22.0), 2.3376, 48.8606))
        .with_attraction(located(attraction("eiffel", "landmark", 4.6, 120, 29.0), 2.2945, 48.8584))
        .with_attraction(located(attraction("orsay", "museum", 4.7, 150, 16.0), 2.3266, 48.8600))
        .with_attraction(located(attraction("montmartre", "walk", 4.4, 90, 0.0), 2.3431, 48.8867))
        .with_attraction(located(attraction("seine", "cruise", 4.2, 60, 15.0), 2.3000, 48.8610))
}

/// Lyon with a station and a few attractions.
pub fn lyon() -> Destination {
    let centre = Coord { x: 4.8357, y: 45.7640 };
    Destination::new("lyon", "Lyon", centre)
        .with_category("cultural")
        .with_popularity(0.40)
        .with_average_daily_cost(150.0)
        .with_hub("Part-Dieu", HubKind::TrainStation, Coord { x: 4.8590, y: 45.7605 })
        .with_attraction(located(attraction("fourviere", "landmark", 4.6, 90, 0.0), 4.8225, 45.7623))
        .with_attraction(located(attraction("vieux-lyon", "walk", 4.5, 120, 0.0), 4.8270, 45.7620))
        .with_attraction(located(attraction("confluence", "museum", 4.3, 120, 12.0), 4.8180, 45.7330))
}

/// Marseille with an airport and a ferry port.
pub fn marseille() -> Destination {
    let centre = Coord { x: 5.3698, y: 43.2965 };
    Destination::new("marseille", "Marseille", centre)
        .with_category("coastal")
        .with_popularity(0.60)
        .with_average_daily_cost(160.0)
        .with_hub("MRS", HubKind::Airport, Coord { x: 5.2214, y: 43.4393 })
        .with_hub("Saint-Charles", HubKind::TrainStation, Coord { x: 5.3806, y: 43.3027 })
        .with_attraction(located(attraction("calanques", "nature", 4.8, 240, 0.0), 5.4500, 43.2100))
        .with_attraction(located(attraction("mucem", "museum", 4.4, 120, 11.0), 5.3608, 43.2967))
}

fn located(attraction: Attraction, longitude: f64, latitude: f64) -> Attraction {
    Attraction {
        location: Coord {
            x: longitude,
            y: latitude,
        },
        ..attraction
    }
}
