//! Route ordering for trip planning.
//!
//! Orders a user's saved places into a travel-efficient visiting sequence
//! from a start location, using the classic open-tour nearest-neighbor
//! heuristic: from the current position, always step to the closest unvisited
//! place. O(n^2) in place count with no optimality guarantee, which is fine
//! for user-curated lists of tens of places. Only straight-line great-circle
//! distance is modeled; road networks, traffic, and ETA conversion are the
//! caller's concern.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::{
    geo::{Coordinate, haversine_distance},
    store::PlaceRecord,
};

/// One stop in an optimized route. Transient output, not persisted here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStop {
    pub id: u64,
    pub name: String,
    pub coordinate: Coordinate,
    /// Dense 0-based visiting position.
    pub order: usize,
    /// Exact great-circle distance from the previous stop (or the start, for
    /// the first stop), meters.
    pub distance_meters: f64,
}

/// A complete ordered route and its total length.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedRoute {
    pub stops: Vec<RouteStop>,
    /// Sum of every stop's `distance_meters`.
    pub total_distance_meters: f64,
}

/// Order `places` into a visiting sequence from `start`, nearest-first.
///
/// The result is always a complete permutation of the input: every place
/// appears exactly once, `order` runs densely from 0, and
/// `total_distance_meters` is the exact sum of the consecutive great-circle
/// legs. Empty input yields an empty route with zero total, not an error.
///
/// Ties between exactly equidistant unvisited places go to the one earliest
/// in the input, which keeps the output deterministic for identical inputs.
/// Duplicate coordinates are valid and handled like any other input.
///
/// # Examples
///
/// ```rust
/// use placemark::{Coordinate, PlaceRecord, optimize_route};
///
/// let places = vec![PlaceRecord {
///     id: 1,
///     name: "City Hall".into(),
///     coordinate: Coordinate::new(37.5665, 126.9780)?,
///     address: String::new(),
/// }];
/// let route = optimize_route(&places, Coordinate::new(37.5600, 126.9700)?);
/// assert_eq!(route.stops[0].order, 0);
/// # Ok::<(), placemark::GeoError>(())
/// ```
#[instrument(level = "debug", skip(places), fields(places = places.len()))]
pub fn optimize_route(places: &[PlaceRecord], start: Coordinate) -> OptimizedRoute {
    let mut unvisited: Vec<&PlaceRecord> = places.iter().collect();
    let mut stops = Vec::with_capacity(places.len());
    let mut total_distance_meters = 0.0;
    let mut current = start;

    while !unvisited.is_empty() {
        // position_min_by keeps the first of equally-minimum elements, which
        // pins the input-order tie-break.
        let Some(nearest) = unvisited
            .iter()
            .map(|p| haversine_distance(current, p.coordinate))
            .position_min_by(f64::total_cmp)
        else {
            break;
        };

        let place = unvisited.remove(nearest);
        let distance_meters = haversine_distance(current, place.coordinate);
        total_distance_meters += distance_meters;
        current = place.coordinate;

        stops.push(RouteStop {
            id: place.id,
            name: place.name.clone(),
            coordinate: place.coordinate,
            order: stops.len(),
            distance_meters,
        });
    }

    debug!(
        stops = stops.len(),
        total_distance_meters, "route optimization complete"
    );
    OptimizedRoute {
        stops,
        total_distance_meters,
    }
}
