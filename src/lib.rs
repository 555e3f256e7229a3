//! # Platescan
//!
//! A Rust engine for tube-sheet (pipe-plate) inspection:
//! - Hole reconstruction from CAD (DXF) circle and arc entities
//! - Canonical row/column numbering of the hole grid
//! - Angular sector partitioning (2 to 12 sectors) around the plate center
//! - Serpentine "snake path" traversal planning per sector
//! - Live per-sector progress statistics during an inspection sweep
//!
//! ## Architecture
//!
//! Platescan is organized as a workspace with multiple crates:
//!
//! 1. **platescan-core** - Data model, errors, configuration, event bus
//! 2. **platescan-geometry** - DXF reading, extraction, normalization, numbering
//! 3. **platescan-inspect** - Partitioning, progress tracking, path planning, simulation
//! 4. **platescan** - This crate: re-exports plus the demo binary
//!
//! ## Pipeline
//!
//! ```text
//! DXF drawing -> CadPrimitive list -> GeometryExtractor -> normalize
//!   -> GridNumberer -> SectorPartitioner -> PathPlanner
//!   -> SimulationDriver -> SectorProgressTracker -> consumers
//! ```

pub use platescan_core::{
    Bounds, CadPrimitive, EngineConfig, Error, EventBus, EventBusConfig, EventCategory,
    EventFilter, ExtractionTolerances, GeometryError, GeometryEvent, Hole, HoleCollection,
    HoleStatus, InspectionEvent, NormalizationSettings, NumberingError, NumberingSettings,
    PartitionError, PartitionSettings, PathError, PathEvent, PathSettings, PathStep,
    ProgressEvent, ProgressSettings, Result, SectorId, SectorLayout, SectorProgress, SectorSpan,
    StatusCounts, StatusEvent, SubscriptionId,
};

pub use platescan_geometry::{
    normalize, normalize_with, DxfDrawing, DxfError, DxfReader, DxfUnit, ExtractionReport,
    GeometryExtractor, GridNumberer, SkipReason, SkippedPrimitive,
};

pub use platescan_inspect::{
    PathPlanner, SectorPartitioner, SectorProgressTracker, SimulationDriver, SimulationSettings,
    MAX_SECTORS, MIN_SECTORS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured console logging with RUST_LOG environment variable
/// support, defaulting to INFO.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    Ok(())
}
