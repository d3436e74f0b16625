//! Placemark - Geospatial Core for Place Bookmarking
//!
//! Placemark is the geospatial heart of a personal place-bookmarking and
//! trip-planning service. It covers two tightly related algorithms used when
//! creating places and managing lists: duplicate place detection (keeping the
//! same venue from being saved twice under slightly different records) and
//! route optimization (ordering saved places into a travel-efficient visiting
//! sequence). Both rest on shared primitives: Haversine great-circle distance
//! and a bounded bounding-box candidate search.
//!
//! # Quick Start
//!
//! ```rust
//! use placemark::{
//!     Coordinate, DuplicateDetector, InMemoryPlaceStore, PlaceRecord, optimize_route,
//! };
//!
//! let store = InMemoryPlaceStore::new(vec![PlaceRecord {
//!     id: 1,
//!     name: "Blue Bottle Coffee".into(),
//!     coordinate: Coordinate::new(37.7763, -122.4233)?,
//!     address: "66 Mint St, San Francisco".into(),
//! }]);
//!
//! // Duplicate check before saving a new place
//! let detector = DuplicateDetector::new(&store);
//! let duplicates =
//!     detector.detect_duplicates("Blue Botle Coffee", Coordinate::new(37.77657, -122.4233)?)?;
//! assert!(!duplicates.is_empty(), "same venue, one-character typo");
//!
//! // Route a saved list from a start point
//! let places = vec![PlaceRecord {
//!     id: 2,
//!     name: "City Hall".into(),
//!     coordinate: Coordinate::new(37.5665, 126.9780)?,
//!     address: String::new(),
//! }];
//! let route = optimize_route(&places, Coordinate::new(37.5600, 126.9700)?);
//! assert_eq!(route.stops.len(), 1);
//! # Ok::<(), placemark::PlacemarkError>(())
//! ```
//!
//! # Scope
//!
//! Everything here is a synchronous, side-effect-free computation over
//! in-memory inputs. The single external touchpoint is the [`PlaceStore`]
//! trait the candidate search reads through; persistence, authentication,
//! road-network routing, and presentation all live in the surrounding
//! service.

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

pub mod config;
mod dedup;
pub mod error;
mod geo;
mod route;
mod similarity;
mod store;

pub use config::DetectorConfigBuilder;
pub use dedup::{
    DEFAULT_BOX_DELTA_DEG, DEFAULT_MAX_DISTANCE_METERS, DEFAULT_MIN_SIMILARITY, DetectorConfig,
    DuplicateCandidate, DuplicateDetector,
};
pub use error::PlacemarkError;
pub use geo::{Coordinate, EARTH_RADIUS_METERS, GeoError, haversine_distance};
pub use route::{OptimizedRoute, RouteStop, optimize_route};
pub use similarity::name_similarity;
pub use store::{BoundingBox, CandidateFinder, InMemoryPlaceStore, PlaceRecord, PlaceStore, StoreError};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Placemark library.
///
/// Sets up structured logging with configurable levels and filtering. Call
/// this once at the start of your application to enable logging output from
/// Placemark operations; the `RUST_LOG` environment variable takes
/// precedence over the given level.
///
/// # Examples
///
/// ```rust
/// use placemark::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), placemark::PlacemarkError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), PlacemarkError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
