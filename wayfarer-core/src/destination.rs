//! Destinations, their attractions and transport hubs.
//!
//! These records are owned by the caller's data source and only borrowed by
//! the planning pipeline. Coordinates are WGS84 with `x = longitude` and
//! `y = latitude`.

use geo::Coord;

use crate::{DataError, is_valid_location};

/// Kind of transport hub serving a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HubKind {
    /// Commercial airport.
    Airport,
    /// Main-line railway station.
    TrainStation,
    /// Long-distance coach station.
    BusStation,
    /// Passenger ferry terminal.
    FerryPort,
}

/// A transport hub that connects a destination to others.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportHub {
    /// Display name, e.g. `"Gare de Lyon"`.
    pub name: String,
    /// Hub category.
    pub kind: HubKind,
    /// Hub position.
    pub location: Coord<f64>,
}

/// Accessibility features an attraction offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accessibility {
    /// Suitable for visitors with reduced mobility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mobility_friendly: bool,
    /// Step-free access for wheelchairs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wheelchair_accessible: bool,
}

impl Accessibility {
    /// Accessibility for attractions that are fully step-free.
    pub const FULL: Self = Self {
        mobility_friendly: true,
        wheelchair_accessible: true,
    };
}

/// Something to do at a destination.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::Attraction;
///
/// let louvre = Attraction::new("louvre", "art", Coord { x: 2.3376, y: 48.8606 })
///     .with_rating(4.8)
///     .with_duration_minutes(180)
///     .with_cost(22.0)
///     .with_tags(["history"]);
///
/// assert!(louvre.matches("Art"));
/// assert_eq!(louvre.matching_interest_count(&["history".into(), "food".into()]), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attraction {
    /// Identifier unique within its destination.
    pub id: String,
    /// Display name. [`Attraction::new`] uses the identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Primary category, compared case-insensitively with interests.
    pub category: String,
    /// Secondary category tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Visitor rating on a `0.0..=5.0` scale.
    pub rating: f64,
    /// Typical visit length in minutes.
    pub duration_minutes: u16,
    /// Entry cost in trip currency units.
    pub cost: f64,
    /// Attraction position.
    pub location: Coord<f64>,
    /// Accessibility features.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accessibility: Accessibility,
}

impl Attraction {
    /// Construct an attraction with a 60-minute free visit and no rating.
    #[must_use]
    pub fn new(id: impl Into<String>, category: impl Into<String>, location: Coord<f64>) -> Self {
        let identifier = id.into();
        Self {
            name: identifier.clone(),
            id: identifier,
            category: category.into(),
            tags: Vec::new(),
            rating: 0.0,
            duration_minutes: 60,
            cost: 0.0,
            location,
            accessibility: Accessibility::default(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the rating, clamped into `0.0..=5.0`.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    /// Set the visit duration.
    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u16) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Set the entry cost.
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Replace the secondary tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the accessibility features.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Whether `interest` names this attraction's category or one of its tags.
    #[must_use]
    pub fn matches(&self, interest: &str) -> bool {
        self.category.eq_ignore_ascii_case(interest)
            || self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(interest))
    }

    /// Name of the first field holding a value the planner cannot use.
    ///
    /// Ratings must lie in `0.0..=5.0`, costs must be finite and non-negative
    /// and the location must be a valid coordinate.
    #[must_use]
    pub fn invalid_field(&self) -> Option<&'static str> {
        if !(0.0..=5.0).contains(&self.rating) {
            Some("rating")
        } else if !self.cost.is_finite() || self.cost < 0.0 {
            Some("cost")
        } else if !is_valid_location(self.location) {
            Some("location")
        } else {
            None
        }
    }

    /// Count distinct `interests` that this attraction matches.
    ///
    /// Interests differing only by ASCII case count once.
    #[must_use]
    pub fn matching_interest_count(&self, interests: &[String]) -> usize {
        interests
            .iter()
            .enumerate()
            .filter(|(idx, interest)| {
                !interests
                    .iter()
                    .take(*idx)
                    .any(|prior| prior.eq_ignore_ascii_case(interest))
            })
            .filter(|(_, interest)| self.matches(interest))
            .count()
    }
}

/// A place the traveller may visit for one or more days.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfarer_core::{Destination, HubKind};
///
/// let paris = Destination::new("paris", "Paris", Coord { x: 2.3522, y: 48.8566 })
///     .with_category("urban")
///     .with_popularity(0.95)
///     .with_hub("CDG", HubKind::Airport, Coord { x: 2.55, y: 49.0097 });
///
/// assert!(paris.has_hub(HubKind::Airport));
/// assert!(!paris.has_hub(HubKind::FerryPort));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    /// Identifier used by the repository.
    pub id: String,
    /// Display name.
    pub name: String,
    /// City centre position.
    pub location: Coord<f64>,
    /// Category tag, e.g. `"coastal"` or `"urban"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    /// Popularity in `0.0..=1.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity: f64,
    /// Average cost of a day at the destination.
    #[cfg_attr(feature = "serde", serde(default))]
    pub average_daily_cost: f64,
    /// Attractions available at the destination. Order carries no meaning.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attractions: Vec<Attraction>,
    /// Transport hubs serving the destination.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transport_hubs: Vec<TransportHub>,
}

impl Destination {
    /// Construct a destination with no attractions or hubs.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            category: String::new(),
            popularity: 0.0,
            average_daily_cost: 0.0,
            attractions: Vec::new(),
            transport_hubs: Vec::new(),
        }
    }

    /// Set the category tag.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the popularity, clamped into `0.0..=1.0`.
    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity.clamp(0.0, 1.0);
        self
    }

    /// Set the average daily cost.
    #[must_use]
    pub fn with_average_daily_cost(mut self, cost: f64) -> Self {
        self.average_daily_cost = cost;
        self
    }

    /// Append an attraction.
    #[must_use]
    pub fn with_attraction(mut self, attraction: Attraction) -> Self {
        self.attractions.push(attraction);
        self
    }

    /// Append a transport hub.
    #[must_use]
    pub fn with_hub(mut self, name: impl Into<String>, kind: HubKind, location: Coord<f64>) -> Self {
        self.transport_hubs.push(TransportHub {
            name: name.into(),
            kind,
            location,
        });
        self
    }

    /// Whether a hub of `kind` serves this destination.
    #[must_use]
    pub fn has_hub(&self, kind: HubKind) -> bool {
        self.transport_hubs.iter().any(|hub| hub.kind == kind)
    }

    /// Check the record before it enters the pipeline.
    ///
    /// Builders clamp their inputs, but records deserialised from a catalogue
    /// arrive unchecked.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidCoordinates`] for an unusable location,
    /// [`DataError::InvalidDestination`] for popularity outside `0.0..=1.0` or
    /// a negative or non-finite average daily cost, and
    /// [`DataError::InvalidAttraction`] for the first attraction whose
    /// [`Attraction::invalid_field`] reports a problem.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use wayfarer_core::{DataError, Destination};
    ///
    /// let mut lyon = Destination::new("lyon", "Lyon", Coord { x: 4.8357, y: 45.764 });
    /// assert!(lyon.validate().is_ok());
    ///
    /// lyon.popularity = 1.5;
    /// assert_eq!(
    ///     lyon.validate(),
    ///     Err(DataError::InvalidDestination { id: "lyon".into(), field: "popularity" })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), DataError> {
        if !is_valid_location(self.location) {
            return Err(DataError::InvalidCoordinates {
                id: self.id.clone(),
                name: self.name.clone(),
            });
        }
        if !(0.0..=1.0).contains(&self.popularity) {
            return Err(self.invalid_destination("popularity"));
        }
        if !self.average_daily_cost.is_finite() || self.average_daily_cost < 0.0 {
            return Err(self.invalid_destination("average daily cost"));
        }
        for attraction in &self.attractions {
            if let Some(field) = attraction.invalid_field() {
                return Err(DataError::InvalidAttraction {
                    id: self.id.clone(),
                    attraction: attraction.id.clone(),
                    field,
                });
            }
        }
        Ok(())
    }

    fn invalid_destination(&self, field: &'static str) -> DataError {
        DataError::InvalidDestination {
            id: self.id.clone(),
            field,
        }
    }

    /// Count attractions whose category or tags match any of `interests`.
    #[must_use]
    pub fn attractions_matching(&self, interests: &[String]) -> usize {
        self.attractions
            .iter()
            .filter(|attraction| interests.iter().any(|interest| attraction.matches(interest)))
            .count()
    }
}
