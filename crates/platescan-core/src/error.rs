//! Error handling for platescan
//!
//! Component-scoped error types for each pipeline stage:
//! - Geometry errors (arc reconstruction)
//! - Numbering errors (row/column assignment)
//! - Partition errors (sector assignment)
//! - Path errors (traversal planning)
//!
//! All error types use `thiserror`. Stages fail fast with a typed error
//! rather than producing a partial or inconsistent collection; recoverable
//! per-primitive problems travel as diagnostics next to a best-effort
//! result instead (see the geometry crate's `ExtractionReport`).

use thiserror::Error;

/// Errors from hole reconstruction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// More than two primitives plausibly merge into one center/radius
    /// combination — duplicate or noisy input.
    #[error(
        "ambiguous arc match at ({center_x:.3}, {center_y:.3}) r={radius:.3}: \
         {candidates} candidate primitives"
    )]
    AmbiguousMatch {
        /// Contested center x.
        center_x: f64,
        /// Contested center y.
        center_y: f64,
        /// Contested radius.
        radius: f64,
        /// Number of primitives competing for this hole.
        candidates: usize,
    },

    /// Non-empty input produced zero holes — likely a wrong tolerance or
    /// the wrong file.
    #[error("no holes reconstructed from {primitives} primitives")]
    EmptyResult {
        /// Number of input primitives.
        primitives: usize,
    },

    /// A tolerance parameter is not usable.
    #[error("invalid tolerance '{name}': {value}")]
    InvalidTolerance {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Errors from grid numbering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberingError {
    /// Clustering produced no rows or no columns from a non-empty
    /// collection. Defensive check; should be unreachable.
    #[error("degenerate grid: {rows} row cluster(s), {columns} column cluster(s)")]
    DegenerateGrid {
        /// Row clusters found.
        rows: usize,
        /// Column clusters found.
        columns: usize,
    },
}

/// Errors from sector partitioning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// Sector count outside the supported range.
    #[error("invalid sector count {count} (valid: {min}..={max})")]
    InvalidSectorCount {
        /// Requested count.
        count: u8,
        /// Smallest supported count.
        min: u8,
        /// Largest supported count.
        max: u8,
    },
}

/// Errors from path planning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Strict planning was asked to order an empty hole set.
    #[error("cannot plan a path over an empty hole set")]
    EmptyInput,

    /// A hole in the input has no row/column assignment yet.
    #[error("hole '{hole_id}' has no grid assignment; run numbering first")]
    Unnumbered {
        /// Offending hole id.
        hole_id: String,
    },
}

/// Unified error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry extraction failed.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Grid numbering failed.
    #[error("numbering error: {0}")]
    Numbering(#[from] NumberingError),

    /// Sector partitioning failed.
    #[error("partition error: {0}")]
    Partition(#[from] PartitionError),

    /// Path planning failed.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// I/O error from a caller-owned load step.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error from a caller-owned load step.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
