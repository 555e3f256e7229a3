//! Hole records and sector identities.
//!
//! A [`Hole`] is one reconstructed circular feature of the inspected plate.
//! Its geometry is fixed at extraction time; numbering, sector membership,
//! and inspection status are filled in by later pipeline stages.

use serde::{Deserialize, Serialize};

/// Inspection status of a single hole.
///
/// Every hole starts out `Pending`. The simulation or real-detection driver
/// moves it through `Processing` into one of the terminal states; terminal
/// states only revert on an explicit re-detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleStatus {
    /// Not yet visited by the probe.
    Pending,
    /// Probe is currently dwelling on this hole.
    Processing,
    /// Inspection passed.
    Qualified,
    /// Inspection found a defect.
    Defective,
    /// Hole is blocked/blind and cannot be probed.
    Blind,
    /// Position is occupied by a tie rod, not a tube.
    TieRod,
}

impl HoleStatus {
    /// Whether this status is terminal (the hole counts as completed).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            HoleStatus::Qualified | HoleStatus::Defective | HoleStatus::Blind | HoleStatus::TieRod
        )
    }
}

impl Default for HoleStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for HoleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Qualified => write!(f, "qualified"),
            Self::Defective => write!(f, "defective"),
            Self::Blind => write!(f, "blind"),
            Self::TieRod => write!(f, "tie_rod"),
        }
    }
}

/// Index of one angular sector, `0..N-1` for the configured sector count.
pub type SectorId = u8;

/// Angular span of one sector in the normalized convention
/// (degrees, counter-clockwise from +X, half-open).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorSpan {
    /// Sector index.
    pub sector: SectorId,
    /// Inclusive start angle in degrees.
    pub start_angle: f64,
    /// Exclusive end angle in degrees.
    pub end_angle: f64,
}

impl SectorSpan {
    /// Whether a normalized angle in `[0, 360)` falls inside this span.
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// The full sector arrangement produced by a partitioning pass:
/// the sector count, the center point, and every span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorLayout {
    /// Number of sectors.
    pub sector_count: u8,
    /// X coordinate of the partition center.
    pub center_x: f64,
    /// Y coordinate of the partition center.
    pub center_y: f64,
    /// One span per sector, in sector order.
    pub spans: Vec<SectorSpan>,
}

impl SectorLayout {
    /// Angular width of each sector in degrees.
    pub fn sector_width(&self) -> f64 {
        360.0 / f64::from(self.sector_count)
    }
}

/// One reconstructed hole in the plate.
///
/// `(center_x, center_y, radius)` are immutable once the hole is created.
/// `row`, `column`, and `id` are assigned by grid numbering; `sector` by
/// partitioning; `status` by inspection events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    /// Canonical id, e.g. `C004R012`. Provisional until numbering runs.
    pub id: String,
    /// X coordinate of the hole center (mm, normalized convention).
    pub center_x: f64,
    /// Y coordinate of the hole center (mm, normalized convention).
    pub center_y: f64,
    /// Hole radius (mm).
    pub radius: f64,
    /// 1-based row index (row 1 = smallest y cluster). 0 = unassigned.
    pub row: i32,
    /// 1-based column index (column 1 = smallest x cluster). 0 = unassigned.
    pub column: i32,
    /// Current inspection status.
    pub status: HoleStatus,
    /// Assigned sector under the current partition.
    pub sector: SectorId,
}

impl Hole {
    /// Create a new hole at the given center with the given radius.
    ///
    /// Numbering and sector fields start unassigned; status starts `Pending`.
    pub fn new(id: impl Into<String>, center_x: f64, center_y: f64, radius: f64) -> Self {
        debug_assert!(
            radius.is_finite() && radius > 0.0,
            "radius must be positive and finite, got {radius}"
        );
        Self {
            id: id.into(),
            center_x,
            center_y,
            radius,
            row: 0,
            column: 0,
            status: HoleStatus::Pending,
            sector: 0,
        }
    }

    /// Euclidean distance between this hole's center and another point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.center_x - x).powi(2) + (self.center_y - y).powi(2)).sqrt()
    }
}
