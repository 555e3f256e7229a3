//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable for logging/replay. They describe
//! what happened; consumers (renderer, reporting) decide how to react.

use serde::{Deserialize, Serialize};

use crate::data::{HoleStatus, SectorId};

/// Root event enum for all inspection events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InspectionEvent {
    /// Geometry pipeline events (load, extraction, numbering).
    Geometry(GeometryEvent),
    /// Per-hole status changes.
    Status(StatusEvent),
    /// Aggregated progress updates.
    Progress(ProgressEvent),
    /// Path planning and traversal events.
    Path(PathEvent),
}

impl InspectionEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            InspectionEvent::Geometry(_) => EventCategory::Geometry,
            InspectionEvent::Status(_) => EventCategory::Status,
            InspectionEvent::Progress(_) => EventCategory::Progress,
            InspectionEvent::Path(_) => EventCategory::Path,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            InspectionEvent::Geometry(e) => e.description(),
            InspectionEvent::Status(e) => e.description(),
            InspectionEvent::Progress(e) => e.description(),
            InspectionEvent::Path(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Geometry pipeline events.
    Geometry,
    /// Per-hole status events.
    Status,
    /// Progress aggregate events.
    Progress,
    /// Path planning/traversal events.
    Path,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Geometry => write!(f, "Geometry"),
            EventCategory::Status => write!(f, "Status"),
            EventCategory::Progress => write!(f, "Progress"),
            EventCategory::Path => write!(f, "Path"),
        }
    }
}

/// Geometry pipeline events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GeometryEvent {
    /// A hole collection finished loading and numbering.
    CollectionLoaded {
        /// Number of holes in the collection.
        holes: usize,
        /// Primitives skipped during extraction.
        skipped: usize,
    },
    /// Sectors were (re)assigned for the whole collection.
    SectorsAssigned {
        /// Sector count of the new partition.
        sector_count: u8,
    },
}

impl GeometryEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            Self::CollectionLoaded { holes, skipped } => {
                format!("collection loaded: {holes} holes, {skipped} skipped")
            }
            Self::SectorsAssigned { sector_count } => {
                format!("sectors assigned: N={sector_count}")
            }
        }
    }
}

/// Per-hole status events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatusEvent {
    /// A hole moved from one status to another.
    HoleStatusChanged {
        /// Hole id.
        hole_id: String,
        /// Previous status.
        old_status: HoleStatus,
        /// New status.
        new_status: HoleStatus,
    },
}

impl StatusEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            Self::HoleStatusChanged {
                hole_id,
                old_status,
                new_status,
            } => format!("{hole_id}: {old_status} -> {new_status}"),
        }
    }
}

/// Progress aggregate events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// The tracker published a coalesced flush.
    Flushed {
        /// Global completed count at flush time.
        completed: u32,
        /// Global total at flush time.
        total: u32,
    },
}

impl ProgressEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Flushed { completed, total } => {
                format!("progress flushed: {completed}/{total}")
            }
        }
    }
}

/// Path planning and traversal events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PathEvent {
    /// A path was planned for a sector.
    Planned {
        /// Sector the path covers; None for the whole collection.
        sector: Option<SectorId>,
        /// Number of steps in the path.
        steps: usize,
    },
    /// The driver advanced to a step.
    StepAdvanced {
        /// Zero-based step index.
        index: usize,
        /// Primary hole of the step.
        hole_id: String,
    },
}

impl PathEvent {
    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Planned { sector, steps } => match sector {
                Some(s) => format!("path planned for sector {s}: {steps} steps"),
                None => format!("path planned: {steps} steps"),
            },
            Self::StepAdvanced { index, hole_id } => {
                format!("step {index}: {hole_id}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_match_variants() {
        let e = InspectionEvent::Status(StatusEvent::HoleStatusChanged {
            hole_id: "C001R001".into(),
            old_status: HoleStatus::Pending,
            new_status: HoleStatus::Processing,
        });
        assert_eq!(e.category(), EventCategory::Status);
        assert_eq!(e.description(), "C001R001: pending -> processing");
    }

    #[test]
    fn geometry_events_describe_the_pipeline_stage() {
        let loaded = InspectionEvent::Geometry(GeometryEvent::CollectionLoaded {
            holes: 120,
            skipped: 3,
        });
        assert_eq!(loaded.category(), EventCategory::Geometry);
        assert_eq!(loaded.description(), "collection loaded: 120 holes, 3 skipped");

        let assigned = InspectionEvent::Geometry(GeometryEvent::SectorsAssigned { sector_count: 6 });
        assert_eq!(assigned.category(), EventCategory::Geometry);
        assert_eq!(assigned.description(), "sectors assigned: N=6");

        let planned = InspectionEvent::Path(PathEvent::Planned {
            sector: Some(2),
            steps: 30,
        });
        assert_eq!(planned.description(), "path planned for sector 2: 30 steps");
    }

    #[test]
    fn events_serialize() {
        let e = InspectionEvent::Path(PathEvent::Planned {
            sector: Some(3),
            steps: 42,
        });
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("Planned"));
    }
}
