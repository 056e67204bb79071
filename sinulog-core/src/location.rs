//! Known venues and their map coordinates.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Map centre used until an event with a known venue is selected (Cebu City).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(10.3157, 123.8854);

const BUILTIN_LOCATIONS: [(&str, Coordinate); 5] = [
    ("SM Seaside Cebu", Coordinate::new(10.2791, 123.8584)),
    ("Fuente Osmeña", Coordinate::new(10.3107, 123.8925)),
    ("Plaza Independencia", Coordinate::new(10.2925, 123.9054)),
    ("Basilica del Sto. Nino", Coordinate::new(10.2947, 123.9021)),
    ("SRP", Coordinate::new(10.2673, 123.8827)),
];

/// Outcome of looking an event's places up in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Mapped { place: String, coordinate: Coordinate },
    Unmapped,
}

impl Resolution {
    pub fn is_mapped(&self) -> bool {
        matches!(self, Resolution::Mapped { .. })
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Resolution::Mapped { coordinate, .. } => Some(*coordinate),
            Resolution::Unmapped => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRegistry {
    places: BTreeMap<String, Coordinate>,
}

impl Default for LocationRegistry {
    fn default() -> Self {
        let places = BUILTIN_LOCATIONS
            .iter()
            .map(|(name, coordinate)| (name.to_string(), *coordinate))
            .collect();
        LocationRegistry { places }
    }
}

impl LocationRegistry {
    /// Add or replace a venue.
    pub fn insert(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        self.places.insert(name.into(), coordinate);
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.places.get(name).copied()
    }

    /// The first place, in the given order, that the registry knows.
    pub fn resolve<S: AsRef<str>>(&self, places: &[S]) -> Resolution {
        places
            .iter()
            .find_map(|place| {
                self.get(place.as_ref()).map(|coordinate| Resolution::Mapped {
                    place: place.as_ref().to_string(),
                    coordinate,
                })
            })
            .unwrap_or(Resolution::Unmapped)
    }

    pub fn has_location<S: AsRef<str>>(&self, places: &[S]) -> bool {
        self.resolve(places).is_mapped()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> {
        self.places.iter().map(|(name, c)| (name.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Extend<(String, Coordinate)> for LocationRegistry {
    fn extend<T: IntoIterator<Item = (String, Coordinate)>>(&mut self, iter: T) {
        self.places.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = LocationRegistry::default();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("SRP"), Some(Coordinate::new(10.2673, 123.8827)));
    }

    #[test]
    fn test_first_known_place_wins() {
        let registry = LocationRegistry::default();
        let resolution = registry.resolve(&["Ouano Wharf", "Plaza Independencia", "SRP"]);

        assert_eq!(
            resolution,
            Resolution::Mapped {
                place: "Plaza Independencia".into(),
                coordinate: Coordinate::new(10.2925, 123.9054),
            }
        );
    }

    #[test]
    fn test_unknown_places_are_unmapped() {
        let registry = LocationRegistry::default();
        assert_eq!(registry.resolve(&["Cebu City Sports Center"]), Resolution::Unmapped);
        assert!(!registry.has_location::<&str>(&[]));
    }

    #[test]
    fn test_extend_registry() {
        let mut registry = LocationRegistry::default();
        registry.extend([("Pier 1".to_string(), Coordinate::new(10.2963, 123.9067))]);

        assert!(registry.has_location(&["Pier 1"]));
        assert_eq!(registry.len(), 6);
    }
}
