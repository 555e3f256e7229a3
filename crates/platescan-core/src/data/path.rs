//! Planned traversal steps.

use serde::{Deserialize, Serialize};

/// One step of a planned inspection path.
///
/// A step normally covers a single hole; with interval pairing enabled it
/// may cover two holes the probe can service without repositioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Zero-based position in the planned sequence.
    pub index: usize,
    /// Primary hole for this step.
    pub hole_id: String,
    /// Partner hole when interval pairing combined two columns into one
    /// step; None for singleton steps.
    pub paired_id: Option<String>,
}

impl PathStep {
    /// A singleton step.
    pub fn single(index: usize, hole_id: impl Into<String>) -> Self {
        Self {
            index,
            hole_id: hole_id.into(),
            paired_id: None,
        }
    }

    /// A paired step covering two holes.
    pub fn paired(index: usize, hole_id: impl Into<String>, paired_id: impl Into<String>) -> Self {
        Self {
            index,
            hole_id: hole_id.into(),
            paired_id: Some(paired_id.into()),
        }
    }

    /// Ids covered by this step, primary first.
    pub fn hole_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.hole_id.as_str()).chain(self.paired_id.as_deref())
    }
}
