//! The place-store seam and coarse spatial candidate lookup.
//!
//! The catalog of saved places lives outside this crate (a database, an API,
//! whatever). The core only ever reads from it, through the narrow
//! [`PlaceStore`] trait: one bounding-box query. [`CandidateFinder`] wraps
//! that query; [`InMemoryPlaceStore`] is a complete linear-scan
//! implementation, good for tests and for small in-process catalogs.

use thiserror::Error;
use tracing::debug;

use crate::geo::Coordinate;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("place store query failed: {0}")]
    Query(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A saved place as the external store hands it to us. Read-only to the core.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceRecord {
    pub id: u64,
    pub name: String,
    pub coordinate: Coordinate,
    pub address: String,
}

/// Axis-aligned latitude/longitude rectangle used to prefilter candidates.
///
/// Deliberately over-inclusive: the box corners are farther from the center
/// than any inscribed radius, so everything inside the true radius is inside
/// the box. The next stage prunes with exact distances.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Box centered on `center`, extending `lat_delta`/`lng_delta` degrees in
    /// each direction.
    pub fn around(center: Coordinate, lat_delta: f64, lng_delta: f64) -> Self {
        Self {
            min_latitude: center.latitude - lat_delta,
            max_latitude: center.latitude + lat_delta,
            min_longitude: center.longitude - lng_delta,
            max_longitude: center.longitude + lng_delta,
        }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
    }
}

/// Read-only access to the external place catalog.
///
/// Implementations must return every record whose coordinate falls inside the
/// box. A failing backend must surface the failure as [`StoreError`];
/// returning an empty set on failure would silently disable duplicate
/// detection downstream.
pub trait PlaceStore {
    fn query(&self, bbox: &BoundingBox) -> Result<Vec<PlaceRecord>>;
}

impl<S: PlaceStore + ?Sized> PlaceStore for &S {
    fn query(&self, bbox: &BoundingBox) -> Result<Vec<PlaceRecord>> {
        (**self).query(bbox)
    }
}

/// Coarse bounding-box candidate lookup over a [`PlaceStore`].
///
/// One store query per call, no caching, no retries; both belong to the
/// caller (spec of the surrounding service). The candidate set is expected to
/// be small because the deltas are small, so no spatial index is involved.
#[derive(Debug, Clone)]
pub struct CandidateFinder<S> {
    store: S,
}

impl<S: PlaceStore> CandidateFinder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All stored places within `±lat_delta` / `±lng_delta` degrees of
    /// `center`. Over-inclusive by construction; prune with exact distances.
    pub fn find_candidates(
        &self,
        center: Coordinate,
        lat_delta: f64,
        lng_delta: f64,
    ) -> Result<Vec<PlaceRecord>> {
        let bbox = BoundingBox::around(center, lat_delta, lng_delta);
        let candidates = self.store.query(&bbox)?;
        debug!(
            count = candidates.len(),
            ?bbox,
            "bounding-box candidate query complete"
        );
        Ok(candidates)
    }
}

/// In-process [`PlaceStore`] backed by a `Vec`, filtered by linear scan.
///
/// # Examples
///
/// ```rust
/// use placemark::{Coordinate, InMemoryPlaceStore, PlaceRecord};
///
/// let store = InMemoryPlaceStore::new(vec![PlaceRecord {
///     id: 1,
///     name: "Blue Bottle Coffee".into(),
///     coordinate: Coordinate::new(37.7763, -122.4233)?,
///     address: "66 Mint St".into(),
/// }]);
/// # Ok::<(), placemark::GeoError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlaceStore {
    records: Vec<PlaceRecord>,
}

impl InMemoryPlaceStore {
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PlaceStore for InMemoryPlaceStore {
    fn query(&self, bbox: &BoundingBox) -> Result<Vec<PlaceRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| bbox.contains(r.coordinate))
            .cloned()
            .collect())
    }
}
