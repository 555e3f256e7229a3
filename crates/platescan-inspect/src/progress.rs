//! Per-sector progress tracking with coalesced flushes.
//!
//! The tracker is the one stateful, concurrently-accessed piece of the
//! engine. Writes (`on_status_change`) are serialized through a mutex and
//! land in a pending counter set; on a configurable cadence the pending
//! state is published wholesale into an `RwLock`-guarded snapshot that
//! readers copy from. Readers never observe a torn update — they see the
//! previous flush until the next one replaces it atomically.
//!
//! The counters are never authoritative: `rebuild` re-derives them from a
//! hole collection at any time.

use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};

use platescan_core::{
    HoleCollection, HoleStatus, ProgressSettings, SectorId, SectorLayout, SectorProgress,
    StatusCounts,
};

/// Writer-side state: live counters plus flush bookkeeping.
struct TrackerInner {
    sectors: Vec<StatusCounts>,
    global: StatusCounts,
    last_flush: Instant,
    dirty: bool,
}

/// Reader-side state: the last published flush.
#[derive(Clone, Default)]
struct Published {
    sectors: Vec<StatusCounts>,
    global: StatusCounts,
}

/// Tracks inspection progress per sector and globally.
pub struct SectorProgressTracker {
    inner: Mutex<TrackerInner>,
    published: RwLock<Published>,
    flush_interval: Duration,
}

impl SectorProgressTracker {
    /// Create a tracker for the given sector count.
    pub fn new(sector_count: u8, settings: &ProgressSettings) -> Self {
        let sectors = vec![StatusCounts::default(); usize::from(sector_count)];
        Self {
            inner: Mutex::new(TrackerInner {
                sectors: sectors.clone(),
                global: StatusCounts::default(),
                last_flush: Instant::now(),
                dirty: false,
            }),
            published: RwLock::new(Published {
                sectors,
                global: StatusCounts::default(),
            }),
            flush_interval: Duration::from_millis(settings.flush_interval_ms),
        }
    }

    /// Rebuild all counters from a partitioned collection, discarding any
    /// buffered updates, and publish immediately. Used after load and
    /// after any full sector reassignment.
    pub fn rebuild(&self, collection: &HoleCollection, layout: &SectorLayout) {
        let mut sectors = vec![StatusCounts::default(); usize::from(layout.sector_count)];
        let mut global = StatusCounts::default();
        for hole in collection.iter() {
            if let Some(counts) = sectors.get_mut(usize::from(hole.sector)) {
                counts.increment(hole.status);
            }
            global.increment(hole.status);
        }

        let mut inner = self.inner.lock();
        inner.sectors = sectors;
        inner.global = global;
        inner.dirty = false;
        inner.last_flush = Instant::now();
        Self::publish(&inner, &self.published);
    }

    /// Record one status transition. O(1): decrement the old bucket,
    /// increment the new one, in the hole's sector and globally. The
    /// change becomes reader-visible at the next flush.
    pub fn on_status_change(
        &self,
        sector: SectorId,
        old_status: HoleStatus,
        new_status: HoleStatus,
    ) {
        if old_status == new_status {
            return;
        }
        let mut inner = self.inner.lock();
        if let Some(counts) = inner.sectors.get_mut(usize::from(sector)) {
            counts.decrement(old_status);
            counts.increment(new_status);
        }
        inner.global.decrement(old_status);
        inner.global.increment(new_status);
        inner.dirty = true;

        if inner.last_flush.elapsed() >= self.flush_interval {
            inner.last_flush = Instant::now();
            inner.dirty = false;
            Self::publish(&inner, &self.published);
        }
    }

    /// Publish any buffered updates now, regardless of cadence. Returns
    /// true if there was anything unflushed.
    pub fn force_flush(&self) -> bool {
        let mut inner = self.inner.lock();
        let was_dirty = inner.dirty;
        inner.last_flush = Instant::now();
        inner.dirty = false;
        Self::publish(&inner, &self.published);
        was_dirty
    }

    /// Progress snapshot from the last flush: one sector, or the global
    /// aggregate when `sector` is None. An out-of-range sector reads as
    /// an empty scope.
    pub fn snapshot(&self, sector: Option<SectorId>) -> SectorProgress {
        let published = self.published.read();
        match sector {
            Some(s) => {
                let counts = published
                    .sectors
                    .get(usize::from(s))
                    .copied()
                    .unwrap_or_default();
                SectorProgress::from_counts(Some(s), &counts)
            }
            None => SectorProgress::from_counts(None, &published.global),
        }
    }

    /// Snapshots for every sector, from the last flush.
    pub fn all_sectors(&self) -> Vec<SectorProgress> {
        let published = self.published.read();
        published
            .sectors
            .iter()
            .enumerate()
            .map(|(i, counts)| SectorProgress::from_counts(Some(i as SectorId), counts))
            .collect()
    }

    fn publish(inner: &TrackerInner, published: &RwLock<Published>) {
        let mut guard = published.write();
        guard.sectors = inner.sectors.clone();
        guard.global = inner.global;
    }
}
