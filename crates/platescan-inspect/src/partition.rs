//! Angular sector partitioning.
//!
//! The plate is divided into N equal angular wedges (2 ≤ N ≤ 12) around a
//! center point, sector k spanning `[k·360/N, (k+1)·360/N)` degrees in the
//! normalized convention (counter-clockwise from +X). One parametrized
//! partitioner handles every N; there are no per-count variants, and no
//! axis-direction special cases — callers hand in already-normalized
//! coordinates.
//!
//! Changing the sector count or the center is always a full reassignment
//! over the whole collection, which keeps "every hole has exactly one
//! sector consistent with the current (N, center)" trivially true.

use platescan_core::{
    HoleCollection, PartitionError, PartitionSettings, SectorId, SectorLayout, SectorSpan,
};

/// Smallest supported sector count.
pub const MIN_SECTORS: u8 = 2;
/// Largest supported sector count.
pub const MAX_SECTORS: u8 = 12;

/// Assigns every hole to one angular sector.
#[derive(Debug, Clone)]
pub struct SectorPartitioner {
    sector_count: u8,
    /// Explicit center; None resolves to the bounding-box centroid of the
    /// collection being partitioned.
    center: Option<(f64, f64)>,
}

impl SectorPartitioner {
    /// Create a partitioner for N sectors around the collection's
    /// bounding-box centroid.
    pub fn new(sector_count: u8) -> Result<Self, PartitionError> {
        Self::validate(sector_count)?;
        Ok(Self {
            sector_count,
            center: None,
        })
    }

    /// Create a partitioner for N sectors around an explicit center.
    pub fn with_center(sector_count: u8, center: (f64, f64)) -> Result<Self, PartitionError> {
        Self::validate(sector_count)?;
        Ok(Self {
            sector_count,
            center: Some(center),
        })
    }

    /// Create a partitioner from settings.
    pub fn from_settings(settings: &PartitionSettings) -> Result<Self, PartitionError> {
        Self::validate(settings.sector_count)?;
        Ok(Self {
            sector_count: settings.sector_count,
            center: settings.center,
        })
    }

    fn validate(sector_count: u8) -> Result<(), PartitionError> {
        if !(MIN_SECTORS..=MAX_SECTORS).contains(&sector_count) {
            return Err(PartitionError::InvalidSectorCount {
                count: sector_count,
                min: MIN_SECTORS,
                max: MAX_SECTORS,
            });
        }
        Ok(())
    }

    /// Configured sector count.
    pub fn sector_count(&self) -> u8 {
        self.sector_count
    }

    /// Assign a sector to every hole in place and return the resulting
    /// layout. Always a total reassignment.
    pub fn partition(&self, collection: &mut HoleCollection) -> SectorLayout {
        let (cx, cy) = self.resolve_center(collection);
        let layout = self.layout(cx, cy);

        let ids: Vec<String> = collection.ids().map(str::to_string).collect();
        for id in ids {
            if let Some(hole) = collection.get_mut(&id) {
                let sector = sector_for_point(hole.center_x, hole.center_y, cx, cy, layout.sector_count);
                hole.sector = sector;
            }
        }

        tracing::debug!(
            sector_count = self.sector_count,
            center_x = cx,
            center_y = cy,
            holes = collection.len(),
            "sector partition complete"
        );
        layout
    }

    /// Sector for a single point under this partitioner's center choice
    /// as applied to the given collection.
    pub fn sector_of(&self, collection: &HoleCollection, x: f64, y: f64) -> SectorId {
        let (cx, cy) = self.resolve_center(collection);
        sector_for_point(x, y, cx, cy, self.sector_count)
    }

    /// The angular layout for a given center.
    pub fn layout(&self, center_x: f64, center_y: f64) -> SectorLayout {
        let width = 360.0 / f64::from(self.sector_count);
        let spans = (0..self.sector_count)
            .map(|k| SectorSpan {
                sector: k,
                start_angle: f64::from(k) * width,
                end_angle: f64::from(k + 1) * width,
            })
            .collect();
        SectorLayout {
            sector_count: self.sector_count,
            center_x,
            center_y,
            spans,
        }
    }

    fn resolve_center(&self, collection: &HoleCollection) -> (f64, f64) {
        self.center.unwrap_or_else(|| {
            collection
                .compute_bounds()
                .map(|b| b.centroid())
                .unwrap_or((0.0, 0.0))
        })
    }
}

/// Sector index for a point: atan2 angle from the center, normalized to
/// [0, 360), divided by the sector width. A point exactly on the center
/// has no defined angle; atan2(0, 0) = 0 puts it in sector 0.
///
/// A point a rounding error below a span boundary is snapped up onto it,
/// so holes sitting exactly on a boundary land in the starting sector
/// even when atan2/to_degrees round their angle fractionally low.
fn sector_for_point(x: f64, y: f64, center_x: f64, center_y: f64, sector_count: u8) -> SectorId {
    let angle = (y - center_y).atan2(x - center_x).to_degrees().rem_euclid(360.0);
    let width = 360.0 / f64::from(sector_count);
    let pos = angle / width;
    let mut k = pos.floor();
    if pos - k > 1.0 - 1e-9 {
        k += 1.0;
    }
    // k == sector_count wraps the 360-degree seam back onto sector 0.
    (k as u8) % sector_count
}
