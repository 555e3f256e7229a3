//! Progress aggregates derived from hole statuses.

use serde::{Deserialize, Serialize};

use super::hole::{HoleStatus, SectorId};

/// Raw per-status counters for one sector (or the global aggregate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Holes not yet visited.
    pub pending: u32,
    /// Holes currently being probed.
    pub processing: u32,
    /// Holes that passed inspection.
    pub qualified: u32,
    /// Holes with a detected defect.
    pub defective: u32,
    /// Blocked holes.
    pub blind: u32,
    /// Tie-rod positions.
    pub tie_rod: u32,
}

impl StatusCounts {
    /// Total holes covered by these counters.
    pub fn total(&self) -> u32 {
        self.pending + self.processing + self.qualified + self.defective + self.blind + self.tie_rod
    }

    /// Holes in a terminal state.
    pub fn completed(&self) -> u32 {
        self.qualified + self.defective + self.blind + self.tie_rod
    }

    fn bucket_mut(&mut self, status: HoleStatus) -> &mut u32 {
        match status {
            HoleStatus::Pending => &mut self.pending,
            HoleStatus::Processing => &mut self.processing,
            HoleStatus::Qualified => &mut self.qualified,
            HoleStatus::Defective => &mut self.defective,
            HoleStatus::Blind => &mut self.blind,
            HoleStatus::TieRod => &mut self.tie_rod,
        }
    }

    /// Add one hole with the given status.
    pub fn increment(&mut self, status: HoleStatus) {
        *self.bucket_mut(status) += 1;
    }

    /// Remove one hole with the given status. Saturates at zero rather
    /// than underflowing on a mismatched event stream.
    pub fn decrement(&mut self, status: HoleStatus) {
        let bucket = self.bucket_mut(status);
        *bucket = bucket.saturating_sub(1);
    }
}

/// Progress snapshot for one sector, or the global aggregate when
/// `sector` is None.
///
/// Always derived — reducible from the hole collection at any time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorProgress {
    /// Sector this snapshot covers; None for the global aggregate.
    pub sector: Option<SectorId>,
    /// Total holes in scope.
    pub total: u32,
    /// Holes in a terminal state.
    pub completed: u32,
    /// Qualified holes.
    pub qualified: u32,
    /// Defective holes.
    pub defective: u32,
    /// Pending holes.
    pub pending: u32,
    /// Holes currently processing.
    pub processing: u32,
    /// Blind holes.
    pub blind: u32,
    /// Tie-rod positions.
    pub tie_rod: u32,
    /// completed / total, in percent. 0 when the scope is empty.
    pub progress_pct: f64,
    /// qualified / completed, in percent. 0 when nothing is completed.
    pub qualification_rate: f64,
}

impl SectorProgress {
    /// Build a snapshot from raw counters.
    pub fn from_counts(sector: Option<SectorId>, counts: &StatusCounts) -> Self {
        let total = counts.total();
        let completed = counts.completed();
        let progress_pct = if total == 0 {
            0.0
        } else {
            f64::from(completed) / f64::from(total) * 100.0
        };
        let qualification_rate = if completed == 0 {
            0.0
        } else {
            f64::from(counts.qualified) / f64::from(completed) * 100.0
        };
        Self {
            sector,
            total,
            completed,
            qualified: counts.qualified,
            defective: counts.defective,
            pending: counts.pending,
            processing: counts.processing,
            blind: counts.blind,
            tie_rod: counts.tie_rod,
            progress_pct,
            qualification_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_to_total() {
        let mut counts = StatusCounts::default();
        counts.increment(HoleStatus::Pending);
        counts.increment(HoleStatus::Pending);
        counts.increment(HoleStatus::Qualified);
        counts.increment(HoleStatus::Defective);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.completed(), 2);
    }

    #[test]
    fn decrement_saturates() {
        let mut counts = StatusCounts::default();
        counts.decrement(HoleStatus::Blind);
        assert_eq!(counts.blind, 0);
    }

    #[test]
    fn snapshot_rates() {
        let mut counts = StatusCounts::default();
        for _ in 0..6 {
            counts.increment(HoleStatus::Pending);
        }
        for _ in 0..3 {
            counts.increment(HoleStatus::Qualified);
        }
        counts.increment(HoleStatus::Defective);
        let p = SectorProgress::from_counts(Some(2), &counts);
        assert_eq!(p.total, 10);
        assert_eq!(p.completed, 4);
        assert!((p.progress_pct - 40.0).abs() < 1e-9);
        assert!((p.qualification_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn empty_snapshot_has_zero_rates() {
        let p = SectorProgress::from_counts(None, &StatusCounts::default());
        assert_eq!(p.progress_pct, 0.0);
        assert_eq!(p.qualification_rate, 0.0);
    }
}
