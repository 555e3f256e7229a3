//! Keyed hole collection with deterministic iteration order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::hole::Hole;

/// Axis-aligned bounding box over hole centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest center x.
    pub min_x: f64,
    /// Smallest center y.
    pub min_y: f64,
    /// Largest center x.
    pub max_x: f64,
    /// Largest center y.
    pub max_y: f64,
}

impl Bounds {
    /// Center of the bounding box.
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// The full set of holes for one loaded plate.
///
/// Holes are keyed by id for O(1) lookup; a separate insertion-order list
/// keeps iteration deterministic. Ids must be unique. Bounds over the hole
/// centers are cached and recomputed lazily after mutation.
///
/// The collection is replaced wholesale on reload; holes are never removed
/// during a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoleCollection {
    holes: HashMap<String, Hole>,
    order: Vec<String>,
    #[serde(skip)]
    bounds: Option<Bounds>,
}

impl HoleCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of holes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a hole. Returns the previous hole if the id was already
    /// present (the new hole replaces it in place, keeping its position in
    /// the iteration order).
    pub fn insert(&mut self, hole: Hole) -> Option<Hole> {
        self.bounds = None;
        let id = hole.id.clone();
        let previous = self.holes.insert(id.clone(), hole);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Look up a hole by id.
    pub fn get(&self, id: &str) -> Option<&Hole> {
        self.holes.get(id)
    }

    /// Look up a hole by id, mutably. Callers must not change the id; use
    /// [`HoleCollection::rekey`] to rename.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Hole> {
        // Geometry edits would stale the bounds cache; numbering and status
        // edits are the only supported mutations and leave centers intact.
        self.holes.get_mut(id)
    }

    /// Whether a hole with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.holes.contains_key(id)
    }

    /// Iterate holes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Hole> {
        self.order.iter().filter_map(|id| self.holes.get(id))
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Rename a hole, keeping its slot in the iteration order.
    ///
    /// Returns false if `old_id` does not exist or `new_id` is already
    /// taken by a different hole.
    pub fn rekey(&mut self, old_id: &str, new_id: &str) -> bool {
        if old_id == new_id {
            return self.holes.contains_key(old_id);
        }
        if self.holes.contains_key(new_id) || !self.holes.contains_key(old_id) {
            return false;
        }
        let mut hole = match self.holes.remove(old_id) {
            Some(h) => h,
            None => return false,
        };
        hole.id = new_id.to_string();
        self.holes.insert(new_id.to_string(), hole);
        if let Some(slot) = self.order.iter_mut().find(|id| *id == old_id) {
            *slot = new_id.to_string();
        }
        true
    }

    /// Bounding box over hole centers, computing and caching it on first
    /// use after a mutation. None for an empty collection.
    pub fn bounds(&mut self) -> Option<Bounds> {
        if self.bounds.is_none() {
            self.bounds = self.compute_bounds();
        }
        self.bounds
    }

    /// Bounding box without touching the cache (for shared references).
    pub fn compute_bounds(&self) -> Option<Bounds> {
        let mut iter = self.iter();
        let first = iter.next()?;
        let mut b = Bounds {
            min_x: first.center_x,
            min_y: first.center_y,
            max_x: first.center_x,
            max_y: first.center_y,
        };
        for hole in iter {
            b.min_x = b.min_x.min(hole.center_x);
            b.min_y = b.min_y.min(hole.center_y);
            b.max_x = b.max_x.max(hole.center_x);
            b.max_y = b.max_y.max(hole.center_y);
        }
        Some(b)
    }
}

impl FromIterator<Hole> for HoleCollection {
    fn from_iter<T: IntoIterator<Item = Hole>>(iter: T) -> Self {
        let mut collection = Self::new();
        for hole in iter {
            collection.insert(hole);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(id: &str, x: f64, y: f64) -> Hole {
        Hole::new(id, x, y, 8.865)
    }

    #[test]
    fn insert_and_lookup() {
        let mut c = HoleCollection::new();
        c.insert(hole("A", 0.0, 0.0));
        c.insert(hole("B", 10.0, 0.0));
        assert_eq!(c.len(), 2);
        assert!(c.contains("A"));
        assert_eq!(c.get("B").unwrap().center_x, 10.0);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut c = HoleCollection::new();
        for id in ["C", "A", "B"] {
            c.insert(hole(id, 0.0, 0.0));
        }
        let ids: Vec<_> = c.ids().collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn reinsert_keeps_order_slot() {
        let mut c = HoleCollection::new();
        c.insert(hole("A", 0.0, 0.0));
        c.insert(hole("B", 1.0, 0.0));
        c.insert(hole("A", 5.0, 5.0));
        assert_eq!(c.len(), 2);
        let ids: Vec<_> = c.ids().collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(c.get("A").unwrap().center_x, 5.0);
    }

    #[test]
    fn rekey_preserves_order() {
        let mut c = HoleCollection::new();
        c.insert(hole("H0001", 0.0, 0.0));
        c.insert(hole("H0002", 1.0, 0.0));
        assert!(c.rekey("H0001", "C001R001"));
        let ids: Vec<_> = c.ids().collect();
        assert_eq!(ids, vec!["C001R001", "H0002"]);
        assert!(!c.rekey("H0001", "X"));
        assert!(!c.rekey("H0002", "C001R001"));
    }

    #[test]
    fn bounds_cover_all_centers() {
        let mut c = HoleCollection::new();
        c.insert(hole("A", -5.0, 2.0));
        c.insert(hole("B", 15.0, -3.0));
        c.insert(hole("C", 4.0, 9.0));
        let b = c.bounds().unwrap();
        assert_eq!(b.min_x, -5.0);
        assert_eq!(b.max_x, 15.0);
        assert_eq!(b.min_y, -3.0);
        assert_eq!(b.max_y, 9.0);
        assert_eq!(b.centroid(), (5.0, 3.0));
    }

    #[test]
    fn bounds_cache_invalidated_by_insert() {
        let mut c = HoleCollection::new();
        c.insert(hole("A", 0.0, 0.0));
        assert_eq!(c.bounds().unwrap().max_x, 0.0);
        c.insert(hole("B", 100.0, 0.0));
        assert_eq!(c.bounds().unwrap().max_x, 100.0);
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let mut c = HoleCollection::new();
        assert!(c.bounds().is_none());
    }
}
