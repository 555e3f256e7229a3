//! Engine configuration.
//!
//! Every tunable of the pipeline lives in one explicit [`EngineConfig`]
//! threaded through constructors. There is no ambient global state: in
//! particular the rotation/flip settings that the historical system kept
//! in module-level singletons are plain fields here, applied exactly once
//! by the coordinate normalizer.

use serde::{Deserialize, Serialize};

/// Tolerances for arc reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionTolerances {
    /// Maximum center distance for two primitives to merge (drawing units).
    pub position: f64,
    /// Maximum radius difference for merging, and the band around the
    /// expected hole radius used to reject boundary/reference circles.
    pub radius: f64,
    /// Allowed shortfall from full 360° coverage when merging arcs
    /// (degrees).
    pub gap_degrees: f64,
}

impl Default for ExtractionTolerances {
    fn default() -> Self {
        Self {
            position: 0.01,
            radius: 0.1,
            gap_degrees: 1.0,
        }
    }
}

/// Coordinate normalization settings.
///
/// Applied exactly once, before numbering and partitioning. The engine's
/// fixed convention afterwards is X right, Y up, angles counter-clockwise
/// from +X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationSettings {
    /// One-time rotation of the whole collection, degrees counter-clockwise.
    pub rotation_degrees: f64,
    /// Mirror the collection about its horizontal center line first
    /// (converts device Y-down drawings into the Y-up convention).
    pub flip_y: bool,
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            flip_y: false,
        }
    }
}

/// Sector partitioning settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionSettings {
    /// Number of angular sectors, 2..=12.
    pub sector_count: u8,
    /// Explicit partition center; None uses the bounding-box centroid.
    pub center: Option<(f64, f64)>,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            sector_count: 4,
            center: None,
        }
    }
}

/// Snake-path planning settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Combine two holes a fixed column interval apart into one step.
    pub pairing_enabled: bool,
    /// Column-index difference for pairing. The historical system left the
    /// exact meaning ambiguous; here it is always an explicit column-index
    /// difference.
    pub pair_interval: u32,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            pairing_enabled: false,
            pair_interval: 4,
        }
    }
}

/// Progress tracker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSettings {
    /// Coalescing flush cadence in milliseconds. Status churn between
    /// flushes is buffered; readers only ever see whole flushes.
    pub flush_interval_ms: u64,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            flush_interval_ms: 1000,
        }
    }
}

/// Grid numbering settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberingSettings {
    /// Clustering tolerance in drawing units; None derives it as half the
    /// minimum observed center-to-center distance.
    pub cluster_tolerance: Option<f64>,
}

impl Default for NumberingSettings {
    fn default() -> Self {
        Self {
            cluster_tolerance: None,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Arc reconstruction tolerances.
    pub extraction: ExtractionTolerances,
    /// Coordinate normalization.
    pub normalization: NormalizationSettings,
    /// Grid numbering.
    pub numbering: NumberingSettings,
    /// Sector partitioning.
    pub partition: PartitionSettings,
    /// Snake-path planning.
    pub path: PathSettings,
    /// Progress tracking.
    pub progress: ProgressSettings,
    /// Expected hole radius in drawing units; circles outside the radius
    /// tolerance band around this value are rejected as boundary or
    /// reference geometry.
    pub expected_hole_radius: f64,
}

impl EngineConfig {
    /// Configuration with a given expected hole radius and defaults for
    /// everything else.
    pub fn for_hole_radius(radius: f64) -> Self {
        Self {
            expected_hole_radius: radius,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.extraction.position, 0.01);
        assert_eq!(config.extraction.radius, 0.1);
        assert_eq!(config.extraction.gap_degrees, 1.0);
        assert_eq!(config.partition.sector_count, 4);
        assert_eq!(config.path.pair_interval, 4);
        assert!(!config.path.pairing_enabled);
        assert_eq!(config.progress.flush_interval_ms, 1000);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = EngineConfig::for_hole_radius(8.865);
        config.partition.sector_count = 6;
        config.normalization.rotation_degrees = 90.0;
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"expected_hole_radius": 8.865}"#).unwrap();
        assert_eq!(config.expected_hole_radius, 8.865);
        assert_eq!(config.partition.sector_count, 4);
    }
}
