//! Read-only access to destination data.
//!
//! The planner never owns destination data. Callers inject an implementation
//! of [`DestinationRepository`] and keep it alive for the duration of the
//! request; reads hand back owned copies so a plan never observes a record
//! changing underneath it.

use crate::Destination;

/// Look up destinations by identifier.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use geo::Coord;
/// use wayfarer_core::{Destination, DestinationRepository};
///
/// struct MapRepository(HashMap<String, Destination>);
///
/// impl DestinationRepository for MapRepository {
///     fn get_destination(&self, id: &str) -> Option<Destination> {
///         self.0.get(id).cloned()
///     }
/// }
///
/// let rome = Destination::new("rome", "Rome", Coord { x: 12.4964, y: 41.9028 });
/// let repo = MapRepository(HashMap::from([("rome".to_owned(), rome.clone())]));
/// assert_eq!(repo.get_destination("rome"), Some(rome));
/// assert!(repo.get_destination("oslo").is_none());
/// ```
pub trait DestinationRepository {
    /// Return an owned copy of the destination, or `None` when unknown.
    fn get_destination(&self, id: &str) -> Option<Destination>;
}

impl<R> DestinationRepository for &R
where
    R: DestinationRepository + ?Sized,
{
    fn get_destination(&self, id: &str) -> Option<Destination> {
        (**self).get_destination(id)
    }
}

impl DestinationRepository for [Destination] {
    fn get_destination(&self, id: &str) -> Option<Destination> {
        self.iter().find(|destination| destination.id == id).cloned()
    }
}
