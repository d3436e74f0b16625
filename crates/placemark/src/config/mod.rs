use crate::{dedup::DetectorConfig, error::PlacemarkError};

/// Builder for creating detector configurations with ergonomic defaults.
///
/// The defaults match the production policy: a ±0.001 degree prefilter box,
/// a 100 m duplicate radius, and a 0.8 name-similarity floor.
#[derive(Debug, Clone, Default)]
pub struct DetectorConfigBuilder {
    config: DetectorConfig,
}

impl DetectorConfigBuilder {
    /// Create a new builder with the default thresholds.
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create a builder tuned to flag only near-certain duplicates
    /// (tighter radius, higher similarity floor).
    pub fn strict() -> Self {
        let mut builder = Self::new();
        builder.config.max_distance_meters = 50.0;
        builder.config.min_similarity = 0.9;
        builder
    }

    /// Create a builder that casts a wider net, for catalogs with sloppy
    /// geocoding (larger box and radius, lower similarity floor).
    pub fn relaxed() -> Self {
        let mut builder = Self::new();
        builder.config.box_lat_delta_deg = 0.002;
        builder.config.box_lng_delta_deg = 0.002;
        builder.config.max_distance_meters = 200.0;
        builder.config.min_similarity = 0.7;
        builder
    }

    /// Set the maximum distance in meters for a candidate to count as a
    /// duplicate.
    pub fn max_distance_meters(mut self, meters: f64) -> Self {
        self.config.max_distance_meters = meters.max(0.0);
        self
    }

    /// Set the minimum name similarity for a candidate to count as a
    /// duplicate (must be in `[0, 1]`).
    pub fn min_similarity(mut self, similarity: f64) -> Result<Self, PlacemarkError> {
        if !(0.0..=1.0).contains(&similarity) {
            return Err(PlacemarkError::ConfigError(format!(
                "Similarity threshold must be in [0, 1], got {similarity}"
            )));
        }
        self.config.min_similarity = similarity;
        Ok(self)
    }

    /// Set the prefilter bounding-box half-widths in degrees (must be
    /// positive). Keep the box wider than the distance threshold or the
    /// prefilter will drop true duplicates before they are ever scored.
    pub fn box_deltas_deg(mut self, lat_delta: f64, lng_delta: f64) -> Result<Self, PlacemarkError> {
        if lat_delta <= 0.0 || lng_delta <= 0.0 {
            return Err(PlacemarkError::ConfigError(format!(
                "Bounding-box deltas must be positive, got {lat_delta}/{lng_delta}"
            )));
        }
        self.config.box_lat_delta_deg = lat_delta;
        self.config.box_lng_delta_deg = lng_delta;
        Ok(self)
    }

    /// Build the final configuration.
    pub fn build(self) -> DetectorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::{
        DEFAULT_BOX_DELTA_DEG, DEFAULT_MAX_DISTANCE_METERS, DEFAULT_MIN_SIMILARITY,
    };

    #[test]
    fn test_default_builder() {
        let config = DetectorConfigBuilder::new().build();
        assert_eq!(config.box_lat_delta_deg, DEFAULT_BOX_DELTA_DEG);
        assert_eq!(config.box_lng_delta_deg, DEFAULT_BOX_DELTA_DEG);
        assert_eq!(config.max_distance_meters, DEFAULT_MAX_DISTANCE_METERS);
        assert_eq!(config.min_similarity, DEFAULT_MIN_SIMILARITY);
    }

    #[test]
    fn test_strict_preset() {
        let config = DetectorConfigBuilder::strict().build();
        assert_eq!(config.max_distance_meters, 50.0);
        assert_eq!(config.min_similarity, 0.9);
        // Box stays at the default; 50m still fits inside it.
        assert_eq!(config.box_lat_delta_deg, DEFAULT_BOX_DELTA_DEG);
    }

    #[test]
    fn test_relaxed_preset() {
        let config = DetectorConfigBuilder::relaxed().build();
        assert_eq!(config.box_lat_delta_deg, 0.002);
        assert_eq!(config.max_distance_meters, 200.0);
        assert_eq!(config.min_similarity, 0.7);
    }

    #[test]
    fn test_method_chaining() {
        let config = DetectorConfigBuilder::new()
            .max_distance_meters(75.0)
            .min_similarity(0.85)
            .unwrap()
            .build();

        assert_eq!(config.max_distance_meters, 75.0);
        assert_eq!(config.min_similarity, 0.85);
    }

    #[test]
    fn test_similarity_validation() {
        assert!(DetectorConfigBuilder::new().min_similarity(0.0).is_ok());
        assert!(DetectorConfigBuilder::new().min_similarity(1.0).is_ok());
        assert!(DetectorConfigBuilder::new().min_similarity(1.1).is_err());
        assert!(DetectorConfigBuilder::new().min_similarity(-0.1).is_err());
    }

    #[test]
    fn test_box_delta_validation() {
        assert!(DetectorConfigBuilder::new().box_deltas_deg(0.001, 0.002).is_ok());
        assert!(DetectorConfigBuilder::new().box_deltas_deg(0.0, 0.001).is_err());
        assert!(DetectorConfigBuilder::new().box_deltas_deg(0.001, -1.0).is_err());
    }

    #[test]
    fn test_negative_distance_clamps_to_zero() {
        let config = DetectorConfigBuilder::new().max_distance_meters(-5.0).build();
        assert_eq!(config.max_distance_meters, 0.0);
    }

    #[test]
    fn test_override_presets() {
        let config = DetectorConfigBuilder::strict()
            .max_distance_meters(25.0)
            .build();
        assert_eq!(config.max_distance_meters, 25.0);
        assert_eq!(config.min_similarity, 0.9); // preset value kept
    }

    #[test]
    fn test_builder_via_config_entry_point() {
        let config = DetectorConfig::builder().build();
        assert_eq!(config, DetectorConfig::default());
    }
}
