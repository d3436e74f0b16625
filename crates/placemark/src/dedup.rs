//! Duplicate place detection.
//!
//! Guards place creation against registering the same physical venue twice
//! under slightly different records ("Blue Bottle Coffee" vs "Blue Botle
//! Coffee", 30 m apart). Two phases:
//!
//! 1. A coarse bounding-box query through [`CandidateFinder`] bounds the
//!    candidate set to the places near the proposed coordinate, independent
//!    of catalog size.
//! 2. Each candidate is scored with the exact great-circle distance and the
//!    normalized name similarity, and flagged iff it is within
//!    [`DetectorConfig::max_distance_meters`] AND at least
//!    [`DetectorConfig::min_similarity`] similar.
//!
//! The detector is read-only and carries no transactional guarantee: a
//! concurrent create can still race past it. Durable prevention (a
//! uniqueness constraint keyed on an external identifier) belongs to the
//! place store.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::{
    geo::{Coordinate, haversine_distance},
    similarity::name_similarity,
    store::{CandidateFinder, PlaceRecord, PlaceStore, Result},
};

/// Bounding-box half-width used for the candidate prefilter, in degrees.
/// 0.001 degrees of latitude is roughly 111 m, comfortably wider than the
/// 100 m duplicate radius.
pub const DEFAULT_BOX_DELTA_DEG: f64 = 0.001;

/// Maximum great-circle distance for two places to count as duplicates.
pub const DEFAULT_MAX_DISTANCE_METERS: f64 = 100.0;

/// Minimum name similarity for two places to count as duplicates.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.8;

/// Tunable policy knobs for [`DuplicateDetector`].
///
/// Use [`DetectorConfig::builder`] for validated construction with presets.
///
/// # Examples
///
/// ```rust
/// use placemark::DetectorConfig;
///
/// let config = DetectorConfig::builder()
///     .max_distance_meters(50.0)
///     .min_similarity(0.9)?
///     .build();
/// assert_eq!(config.max_distance_meters, 50.0);
/// # Ok::<(), placemark::PlacemarkError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    /// Prefilter box half-width in degrees of latitude.
    pub box_lat_delta_deg: f64,
    /// Prefilter box half-width in degrees of longitude.
    pub box_lng_delta_deg: f64,
    /// Distance threshold in meters; candidates farther away are never
    /// duplicates, whatever their name says.
    pub max_distance_meters: f64,
    /// Similarity threshold in `[0, 1]`, tuned against the `max(len)`
    /// normalization in [`crate::name_similarity`].
    pub min_similarity: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            box_lat_delta_deg: DEFAULT_BOX_DELTA_DEG,
            box_lng_delta_deg: DEFAULT_BOX_DELTA_DEG,
            max_distance_meters: DEFAULT_MAX_DISTANCE_METERS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl DetectorConfig {
    /// Ergonomic validated construction, see [`crate::DetectorConfigBuilder`].
    pub fn builder() -> crate::config::DetectorConfigBuilder {
        crate::config::DetectorConfigBuilder::new()
    }
}

/// A stored place flagged as a likely duplicate of a proposed new place,
/// with the scores that flagged it. Transient: produced for the creation
/// workflow to show the user, never persisted here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuplicateCandidate {
    pub place: PlaceRecord,
    /// Exact great-circle distance to the proposed coordinate, meters.
    pub distance_meters: f64,
    /// Name similarity in `[0, 1]`.
    pub similarity: f64,
}

/// Duplicate classifier over an injected [`PlaceStore`].
///
/// Stateless between calls; concurrent use from independent callers is safe.
///
/// # Examples
///
/// ```rust
/// use placemark::{Coordinate, DuplicateDetector, InMemoryPlaceStore, PlaceRecord};
///
/// let store = InMemoryPlaceStore::new(vec![PlaceRecord {
///     id: 7,
///     name: "Blue Bottle Coffee".into(),
///     coordinate: Coordinate::new(37.7763, -122.4233)?,
///     address: "66 Mint St".into(),
/// }]);
///
/// let detector = DuplicateDetector::new(store);
/// let duplicates = detector.detect_duplicates("Blue Botle Coffee", Coordinate::new(37.77657, -122.4233)?)?;
/// assert_eq!(duplicates.len(), 1);
/// # Ok::<(), placemark::PlacemarkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DuplicateDetector<S> {
    finder: CandidateFinder<S>,
    config: DetectorConfig,
}

impl<S: PlaceStore> DuplicateDetector<S> {
    /// Detector with the default thresholds (100 m, 0.8 similarity).
    pub fn new(store: S) -> Self {
        Self::with_config(store, DetectorConfig::default())
    }

    pub fn with_config(store: S, config: DetectorConfig) -> Self {
        Self {
            finder: CandidateFinder::new(store),
            config,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Stored places that look like duplicates of a proposed new place,
    /// closest first.
    ///
    /// A store failure propagates as [`crate::StoreError`]; it is never
    /// collapsed into an empty result, since "no duplicates found" is the
    /// answer that lets a duplicate through.
    #[instrument(level = "debug", skip(self))]
    pub fn detect_duplicates(
        &self,
        name: &str,
        coordinate: Coordinate,
    ) -> Result<Vec<DuplicateCandidate>> {
        let candidates = self.finder.find_candidates(
            coordinate,
            self.config.box_lat_delta_deg,
            self.config.box_lng_delta_deg,
        )?;
        let scanned = candidates.len();

        let duplicates: Vec<DuplicateCandidate> = candidates
            .into_iter()
            .filter_map(|place| {
                let distance_meters = haversine_distance(coordinate, place.coordinate);
                let similarity = name_similarity(name, &place.name);
                (distance_meters <= self.config.max_distance_meters
                    && similarity >= self.config.min_similarity)
                    .then_some(DuplicateCandidate {
                        place,
                        distance_meters,
                        similarity,
                    })
            })
            .sorted_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters))
            .collect();

        debug!(
            scanned,
            flagged = duplicates.len(),
            "duplicate classification complete"
        );
        Ok(duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BoundingBox, InMemoryPlaceStore, StoreError};

    fn record(id: u64, name: &str, lat: f64, lng: f64) -> PlaceRecord {
        PlaceRecord {
            id,
            name: name.to_owned(),
            coordinate: Coordinate::new(lat, lng).unwrap(),
            address: String::new(),
        }
    }

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_flags_nearby_typo_as_duplicate() {
        // ~30m north of the stored record, one-character name typo.
        let store = InMemoryPlaceStore::new(vec![record(
            1,
            "Blue Bottle Coffee",
            37.7763,
            -122.4233,
        )]);
        let detector = DuplicateDetector::new(store);

        let duplicates = detector
            .detect_duplicates("Blue Botle Coffee", coord(37.77657, -122.4233))
            .unwrap();

        assert_eq!(duplicates.len(), 1);
        let dup = &duplicates[0];
        assert_eq!(dup.place.id, 1);
        assert!(dup.distance_meters < 40.0, "got {}m", dup.distance_meters);
        assert!(dup.similarity >= 0.8, "got {}", dup.similarity);
    }

    #[test]
    fn test_identical_name_far_away_is_not_duplicate() {
        // Same name, ~500m away: outside the prefilter box, so no duplicate.
        let store = InMemoryPlaceStore::new(vec![record(1, "City Hall", 37.5665, 126.9780)]);
        let detector = DuplicateDetector::new(store);

        let duplicates = detector
            .detect_duplicates("City Hall", coord(37.5710, 126.9780))
            .unwrap();
        assert!(duplicates.is_empty());
    }

    #[test]
    fn test_inside_box_but_beyond_distance_threshold() {
        // 0.00095 degrees of latitude ~= 106m: passes the 0.001-degree box,
        // fails the 100m radius.
        let store = InMemoryPlaceStore::new(vec![record(1, "City Hall", 37.5665, 126.9780)]);
        let detector = DuplicateDetector::new(store);

        let duplicates = detector
            .detect_duplicates("City Hall", coord(37.56745, 126.9780))
            .unwrap();
        assert!(duplicates.is_empty());
    }

    #[test]
    fn test_nearby_but_dissimilar_name_is_not_duplicate() {
        let store = InMemoryPlaceStore::new(vec![record(1, "Dongdaemun Gate", 37.5665, 126.9780)]);
        let detector = DuplicateDetector::new(store);

        let duplicates = detector
            .detect_duplicates("City Hall", coord(37.5665, 126.9781))
            .unwrap();
        assert!(duplicates.is_empty());
    }

    #[test]
    fn test_results_sorted_closest_first() {
        let store = InMemoryPlaceStore::new(vec![
            record(1, "City Hall", 37.5671, 126.9780),
            record(2, "City Hall", 37.5666, 126.9780),
        ]);
        let detector = DuplicateDetector::new(store);

        let duplicates = detector
            .detect_duplicates("City Hall", coord(37.5665, 126.9780))
            .unwrap();

        let ids: Vec<u64> = duplicates.iter().map(|d| d.place.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(duplicates[0].distance_meters <= duplicates[1].distance_meters);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let store = InMemoryPlaceStore::new(vec![
            record(1, "Blue Bottle Coffee", 37.7763, -122.4233),
            record(2, "Blue Bottle Cafe", 37.77635, -122.4233),
        ]);
        let detector = DuplicateDetector::new(store);
        let target = coord(37.77640, -122.4233);

        let first = detector.detect_duplicates("Blue Bottle Coffee", target).unwrap();
        let second = detector.detect_duplicates("Blue Bottle Coffee", target).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_failure_propagates() {
        struct FailingStore;
        impl PlaceStore for FailingStore {
            fn query(&self, _bbox: &BoundingBox) -> Result<Vec<PlaceRecord>> {
                Err(StoreError::Query(anyhow::anyhow!("connection reset")))
            }
        }

        let detector = DuplicateDetector::new(FailingStore);
        let result = detector.detect_duplicates("City Hall", coord(37.5665, 126.9780));
        assert!(
            result.is_err(),
            "a failing store must not look like 'no duplicates'"
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let store = InMemoryPlaceStore::new(vec![record(1, "City Hall", 37.5665, 126.9780)]);
        // ~11m away; a 10m radius rejects it.
        let config = DetectorConfig {
            max_distance_meters: 10.0,
            ..DetectorConfig::default()
        };
        let detector = DuplicateDetector::with_config(store, config);

        let duplicates = detector
            .detect_duplicates("City Hall", coord(37.5666, 126.9780))
            .unwrap();
        assert!(duplicates.is_empty());
    }
}
