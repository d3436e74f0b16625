//! Geographic primitives: the [`Coordinate`] value type and great-circle
//! distance.
//!
//! Distances are always computed with the Haversine formula over a spherical
//! Earth model and reported in meters. Every `distance_meters` field elsewhere
//! in this crate is the exact output of [`haversine_distance`], never an
//! estimate.

use thiserror::Error;

/// Mean Earth radius in meters, as used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("invalid coordinate: latitude {latitude} must be in [-90, 90], longitude {longitude} in [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// A WGS84-style latitude/longitude pair in decimal degrees.
///
/// Immutable value type. Range validation happens once at the boundary via
/// [`Coordinate::new`]; the distance functions assume valid input and only
/// assert in debug builds.
///
/// # Examples
///
/// ```rust
/// use placemark::Coordinate;
///
/// let seoul_city_hall = Coordinate::new(37.5665, 126.9780)?;
/// assert!(seoul_city_hall.is_valid());
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// # Ok::<(), placemark::GeoError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating ranges and finiteness.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let candidate = Self {
            latitude,
            longitude,
        };
        if candidate.is_valid() {
            Ok(candidate)
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Whether latitude and longitude are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Haversine formula over a sphere of radius [`EARTH_RADIUS_METERS`]. Pure and
/// deterministic: symmetric in its arguments, and zero for identical inputs.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    debug_assert!(a.is_valid(), "caller must validate coordinates: {a:?}");
    debug_assert!(b.is_valid(), "caller must validate coordinates: {b:?}");

    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_METERS * c
}
