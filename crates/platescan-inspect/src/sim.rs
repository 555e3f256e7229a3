//! Simulated inspection driver.
//!
//! Drives a planned path the way the real probe rig does: advance to a
//! step, mark its holes `Processing`, dwell, then resolve each hole to a
//! terminal status and move on. One driver task is the single writer for
//! hole statuses — the tracker and event bus fan the changes out to
//! readers. There are no per-hole timers anywhere.
//!
//! The caller owns all timing policy through [`SimulationSettings`] and
//! owns the verdicts through the qualification function (the real system
//! plugs its detection result in here; the demo binary supplies a
//! deterministic stand-in).

use std::sync::Arc;
use std::time::Duration;

use platescan_core::{
    EventBus, Hole, HoleCollection, HoleStatus, InspectionEvent, PathEvent, PathStep,
    ProgressEvent, StatusEvent, ThreadSafeRw,
};

use crate::progress::SectorProgressTracker;

/// Timing policy for the simulated sweep.
#[derive(Debug, Clone, Copy)]
pub struct SimulationSettings {
    /// How long the probe dwells on each step before the verdict lands.
    pub step_dwell: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            step_dwell: Duration::from_millis(100),
        }
    }
}

/// Decides the terminal status of a hole once its dwell elapses.
pub type QualifyFn = dyn Fn(&Hole) -> HoleStatus + Send + Sync;

/// Single-writer driver advancing a planned path over a shared collection.
pub struct SimulationDriver {
    collection: ThreadSafeRw<HoleCollection>,
    tracker: Arc<SectorProgressTracker>,
    bus: Option<Arc<EventBus>>,
    qualify: Arc<QualifyFn>,
    settings: SimulationSettings,
}

impl SimulationDriver {
    /// Create a driver over a shared collection and tracker.
    pub fn new(
        collection: ThreadSafeRw<HoleCollection>,
        tracker: Arc<SectorProgressTracker>,
        qualify: Arc<QualifyFn>,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            collection,
            tracker,
            bus: None,
            qualify,
            settings,
        }
    }

    /// Publish step and status events on this bus while running.
    pub fn with_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Run the sweep over a planned path. Resolves every step's holes to
    /// a terminal status; finishes with a forced progress flush so the
    /// final counts are reader-visible immediately.
    pub async fn run(&self, path: &[PathStep]) {
        tracing::info!(steps = path.len(), "simulated sweep starting");
        for step in path {
            self.publish(InspectionEvent::Path(PathEvent::StepAdvanced {
                index: step.index,
                hole_id: step.hole_id.clone(),
            }));

            for id in step.hole_ids() {
                self.transition(id, HoleStatus::Processing);
            }

            tokio::time::sleep(self.settings.step_dwell).await;

            for id in step.hole_ids() {
                let verdict = {
                    let collection = self.collection.read();
                    collection.get(id).map(|hole| (self.qualify)(hole))
                };
                if let Some(status) = verdict {
                    self.transition(id, status);
                }
            }
        }

        self.tracker.force_flush();
        let global = self.tracker.snapshot(None);
        self.publish(InspectionEvent::Progress(ProgressEvent::Flushed {
            completed: global.completed,
            total: global.total,
        }));
        tracing::info!(
            completed = global.completed,
            total = global.total,
            "simulated sweep finished"
        );
    }

    /// Apply one status transition: collection first, then tracker, then
    /// the event bus.
    fn transition(&self, hole_id: &str, new_status: HoleStatus) {
        let old_status = {
            let mut collection = self.collection.write();
            match collection.get_mut(hole_id) {
                Some(hole) => {
                    let old = hole.status;
                    hole.status = new_status;
                    Some((old, hole.sector))
                }
                None => None,
            }
        };
        let (old_status, sector) = match old_status {
            Some(pair) => pair,
            None => {
                tracing::warn!(hole_id, "status change for unknown hole ignored");
                return;
            }
        };
        if old_status == new_status {
            return;
        }
        self.tracker.on_status_change(sector, old_status, new_status);
        self.publish(InspectionEvent::Status(StatusEvent::HoleStatusChanged {
            hole_id: hole_id.to_string(),
            old_status,
            new_status,
        }));
    }

    fn publish(&self, event: InspectionEvent) {
        if let Some(bus) = &self.bus {
            // Nobody listening is fine.
            let _ = bus.publish(event);
        }
    }
}
