use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;

/// Great-circle distance in metres between two points given in degrees,
/// on a sphere with the mean Earth radius (6,371 km).
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let km = distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    );
    km * 1000.0
}

#[derive(Debug, Clone)]
struct Entry<T> {
    latitude: f64,
    longitude: f64,
    value: T,
}

/// A collection of values stored by latitude and longitude, queried for the value
/// nearest to a point.
///
/// The set only grows. Lookups are a linear scan, which is fine for the handful of
/// stations a service registers.
///
/// # Examples
///
/// ```
/// use weatherd::GeoSet;
///
/// let mut set = GeoSet::new();
/// set.add(43.4977, -80.5270, "conestoga mall");
/// set.add(43.4242, -80.4392, "fairview mall");
///
/// // University of Waterloo
/// assert_eq!(set.closest(43.4723, -80.5449), Some(&"conestoga mall"));
/// ```
#[derive(Debug, Clone)]
pub struct GeoSet<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for GeoSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GeoSet<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `value` at the given location (degrees). Duplicate locations are allowed.
    pub fn add(&mut self, latitude: f64, longitude: f64, value: T) {
        self.entries.push(Entry {
            latitude,
            longitude,
            value,
        });
    }

    /// Returns the value nearest to the given location, or `None` if the set is empty.
    ///
    /// When several entries are equally near, the one added first wins.
    pub fn closest(&self, latitude: f64, longitude: f64) -> Option<&T> {
        // min_by_key keeps the first of equal minima.
        self.entries
            .iter()
            .min_by_key(|e| OrderedFloat(distance_m(latitude, longitude, e.latitude, e.longitude)))
            .map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(latitude, longitude, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, &T)> {
        self.entries
            .iter()
            .map(|e| (e.latitude, e.longitude, &e.value))
    }
}
