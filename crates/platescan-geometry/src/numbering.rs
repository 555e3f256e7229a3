//! Canonical row/column numbering.
//!
//! Hole centers are clustered per axis with a 1-D greedy pass: sort the
//! coordinates, start a new cluster whenever the gap to the previous value
//! exceeds the tolerance. Row 1 is the smallest-y cluster and column 1 the
//! smallest-x cluster; this ordering is the single numbering convention of
//! the engine and deliberately independent of any axis-direction concern
//! (normalization has already fixed the axes by the time numbering runs).
//!
//! Numbering is idempotent: ids are a pure function of the (normalized)
//! coordinates, so re-running it on an already-numbered collection
//! reproduces the same `(row, column, id)` for every hole.

use platescan_core::{Hole, HoleCollection, NumberingError, NumberingSettings};

/// Assigns row/column indices and canonical ids.
#[derive(Debug, Clone, Default)]
pub struct GridNumberer {
    settings: NumberingSettings,
}

impl GridNumberer {
    /// Create a numberer with the given settings.
    pub fn new(settings: NumberingSettings) -> Self {
        Self { settings }
    }

    /// Number a collection, producing a new collection with `row`,
    /// `column`, and canonical `C{column:03}R{row:03}` ids assigned.
    /// Status and sector fields are carried over unchanged.
    ///
    /// If two holes collapse onto the same grid cell (extraction
    /// tolerances too loose for the drawing), both are kept: the second
    /// and later holes in the cell get a `#n` suffix on the canonical id,
    /// e.g. `C001R001#2`, and a warning is logged. Consumers that require
    /// strictly canonical ids should treat the warning as a signal to
    /// re-extract with tighter tolerances.
    pub fn number(&self, collection: &HoleCollection) -> Result<HoleCollection, NumberingError> {
        if collection.is_empty() {
            return Ok(HoleCollection::new());
        }

        let xs: Vec<f64> = collection.iter().map(|h| h.center_x).collect();
        let ys: Vec<f64> = collection.iter().map(|h| h.center_y).collect();

        let tolerance = self.tolerance_for(collection);

        let columns = cluster(&xs, tolerance);
        let rows = cluster(&ys, tolerance);

        if rows.cluster_count == 0 || columns.cluster_count == 0 {
            return Err(NumberingError::DegenerateGrid {
                rows: rows.cluster_count,
                columns: columns.cluster_count,
            });
        }

        tracing::debug!(
            rows = rows.cluster_count,
            columns = columns.cluster_count,
            "grid clustering complete"
        );

        let mut numbered = HoleCollection::new();
        for (index, hole) in collection.iter().enumerate() {
            let column = columns.assignment[index] + 1;
            let row = rows.assignment[index] + 1;
            let id = format!("C{column:03}R{row:03}");
            let mut hole = Hole {
                row: row as i32,
                column: column as i32,
                ..hole.clone()
            };
            hole.id = id;
            if numbered.contains(&hole.id) {
                // Two holes collapsed onto one grid cell; extraction
                // tolerances are off. Keep both, disambiguated.
                tracing::warn!(id = %hole.id, "duplicate grid cell; suffixing id");
                let mut n = 2;
                while numbered.contains(&format!("{}#{n}", hole.id)) {
                    n += 1;
                }
                hole.id = format!("{}#{n}", hole.id);
            }
            numbered.insert(hole);
        }
        Ok(numbered)
    }

    /// Clustering tolerance: the configured value, or half the minimum
    /// observed center-to-center spacing between holes. Deriving from the
    /// 2-D spacing rather than per-axis gaps keeps row jitter from
    /// shrinking the tolerance below the grid pitch.
    fn tolerance_for(&self, collection: &HoleCollection) -> f64 {
        if let Some(tolerance) = self.settings.cluster_tolerance {
            return tolerance;
        }
        let holes: Vec<&Hole> = collection.iter().collect();
        let mut min_spacing = f64::INFINITY;
        for i in 0..holes.len() {
            for j in (i + 1)..holes.len() {
                let d = holes[i].distance_to(holes[j].center_x, holes[j].center_y);
                if d > 1e-9 && d < min_spacing {
                    min_spacing = d;
                }
            }
        }
        if min_spacing.is_finite() {
            min_spacing / 2.0
        } else {
            // Single hole, or all holes coincident.
            1e-6
        }
    }
}

struct Clustering {
    /// Cluster index per input value, in input order.
    assignment: Vec<usize>,
    cluster_count: usize,
}

/// 1-D greedy clustering. Order-independent: operates on the sorted
/// values, then maps cluster indices back to input order. Clusters are
/// numbered in ascending coordinate order.
fn cluster(values: &[f64], tolerance: f64) -> Clustering {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut assignment = vec![0usize; values.len()];
    let mut cluster_count = 0usize;
    let mut previous = f64::NEG_INFINITY;
    for &index in &order {
        let value = values[index];
        if cluster_count == 0 || value - previous > tolerance {
            cluster_count += 1;
        }
        assignment[index] = cluster_count - 1;
        previous = value;
    }
    Clustering {
        assignment,
        cluster_count,
    }
}
