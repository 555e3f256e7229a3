//! Snake-path planning.
//!
//! Orders a sector's holes (or the whole collection) into the serpentine
//! sweep a physical probe drives: rows are traversed starting from the
//! edge nearest the plate center and moving outward, and the column
//! direction alternates on successive rows (boustrophedon) so the probe
//! never travels back across a row it just finished.
//!
//! The outward rule is evaluated once per plan: if the scope's mean y lies
//! at or above the partition center the rows run in ascending y order
//! (the low rows are nearest the center), otherwise descending.
//!
//! Interval pairing is opt-in: within a row, a hole may be combined with
//! the not-yet-consumed hole exactly `pair_interval` columns further along
//! the traversal direction into a single detection unit. Columns that
//! cannot be paired are emitted as singletons. The interval is always a
//! column-index difference.

use std::collections::BTreeMap;

use platescan_core::{
    Hole, HoleCollection, PathError, PathSettings, PathStep, SectorId, SectorLayout,
};

/// Plans serpentine traversal sequences.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    settings: PathSettings,
}

impl PathPlanner {
    /// Create a planner with the given settings.
    pub fn new(settings: PathSettings) -> Self {
        Self { settings }
    }

    /// Plan a path over one sector's holes, or over the whole collection
    /// when `sector` is None.
    ///
    /// An empty scope yields an empty path; use
    /// [`PathPlanner::plan_strict`] to treat that as an error instead.
    /// Every hole in scope appears in exactly one step. Fails with
    /// `PathError::Unnumbered` if a hole has no grid assignment yet.
    pub fn plan(
        &self,
        collection: &HoleCollection,
        layout: &SectorLayout,
        sector: Option<SectorId>,
    ) -> Result<Vec<PathStep>, PathError> {
        let holes: Vec<&Hole> = collection
            .iter()
            .filter(|h| sector.map_or(true, |s| h.sector == s))
            .collect();
        if holes.is_empty() {
            return Ok(Vec::new());
        }
        for hole in &holes {
            if hole.row <= 0 || hole.column <= 0 {
                return Err(PathError::Unnumbered {
                    hole_id: hole.id.clone(),
                });
            }
        }

        // Row index -> holes, ordered by row.
        let mut rows: BTreeMap<i32, Vec<&Hole>> = BTreeMap::new();
        for hole in &holes {
            rows.entry(hole.row).or_default().push(hole);
        }

        // Outward rule, once per plan.
        let mean_y: f64 = holes.iter().map(|h| h.center_y).sum::<f64>() / holes.len() as f64;
        let ascending_rows = mean_y >= layout.center_y;

        let row_order: Vec<i32> = if ascending_rows {
            rows.keys().copied().collect()
        } else {
            rows.keys().rev().copied().collect()
        };

        let mut steps = Vec::with_capacity(holes.len());
        for (row_index, row) in row_order.iter().enumerate() {
            let mut row_holes = rows.remove(row).unwrap_or_default();
            let left_to_right = row_index % 2 == 0;
            if left_to_right {
                row_holes.sort_by_key(|h| h.column);
            } else {
                row_holes.sort_by_key(|h| std::cmp::Reverse(h.column));
            }

            if self.settings.pairing_enabled {
                self.emit_paired(&row_holes, left_to_right, &mut steps);
            } else {
                for hole in row_holes {
                    steps.push(PathStep::single(steps.len(), hole.id.as_str()));
                }
            }
        }

        tracing::debug!(
            sector = ?sector,
            holes = holes.len(),
            steps = steps.len(),
            "snake path planned"
        );
        Ok(steps)
    }

    /// Like [`PathPlanner::plan`], but an empty scope is a
    /// `PathError::EmptyInput` failure.
    pub fn plan_strict(
        &self,
        collection: &HoleCollection,
        layout: &SectorLayout,
        sector: Option<SectorId>,
    ) -> Result<Vec<PathStep>, PathError> {
        let steps = self.plan(collection, layout, sector)?;
        if steps.is_empty() {
            return Err(PathError::EmptyInput);
        }
        Ok(steps)
    }

    /// Emit one row's steps with interval pairing. `row_holes` is already
    /// in traversal order.
    fn emit_paired(&self, row_holes: &[&Hole], left_to_right: bool, steps: &mut Vec<PathStep>) {
        let interval = self.settings.pair_interval as i32;
        let direction = if left_to_right { 1 } else { -1 };
        let mut consumed = vec![false; row_holes.len()];

        for i in 0..row_holes.len() {
            if consumed[i] {
                continue;
            }
            consumed[i] = true;
            let hole = row_holes[i];
            let partner_column = hole.column + interval * direction;
            let partner = row_holes
                .iter()
                .enumerate()
                .skip(i + 1)
                .find(|(j, h)| !consumed[*j] && h.column == partner_column);
            match partner {
                Some((j, partner_hole)) => {
                    consumed[j] = true;
                    steps.push(PathStep::paired(
                        steps.len(),
                        hole.id.as_str(),
                        partner_hole.id.as_str(),
                    ));
                }
                None => steps.push(PathStep::single(steps.len(), hole.id.as_str())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platescan_core::SectorSpan;

    fn layout_at(center_y: f64) -> SectorLayout {
        SectorLayout {
            sector_count: 4,
            center_x: 0.0,
            center_y,
            spans: (0..4)
                .map(|k| SectorSpan {
                    sector: k,
                    start_angle: f64::from(k) * 90.0,
                    end_angle: f64::from(k + 1) * 90.0,
                })
                .collect(),
        }
    }

    /// rows x cols grid with 10-unit pitch, numbered, all in sector 0.
    fn grid(rows: i32, cols: i32) -> HoleCollection {
        let mut collection = HoleCollection::new();
        for row in 1..=rows {
            for col in 1..=cols {
                let mut hole = Hole::new(
                    format!("C{col:03}R{row:03}"),
                    f64::from(col) * 10.0,
                    f64::from(row) * 10.0,
                    8.865,
                );
                hole.row = row;
                hole.column = col;
                collection.insert(hole);
            }
        }
        collection
    }

    fn ids(steps: &[PathStep]) -> Vec<&str> {
        steps.iter().map(|s| s.hole_id.as_str()).collect()
    }

    #[test]
    fn snake_alternates_direction_per_row() {
        // Scope lies above the center, so rows run ascending.
        let steps = PathPlanner::default()
            .plan(&grid(2, 3), &layout_at(0.0), None)
            .unwrap();
        assert_eq!(
            ids(&steps),
            vec![
                "C001R001", "C002R001", "C003R001", // row 1 left-to-right
                "C003R002", "C002R002", "C001R002", // row 2 right-to-left
            ]
        );
    }

    #[test]
    fn rows_run_outward_from_the_center() {
        // Scope entirely below the center: nearest row is the highest y,
        // so rows run descending.
        let steps = PathPlanner::default()
            .plan(&grid(2, 2), &layout_at(1000.0), None)
            .unwrap();
        assert_eq!(
            ids(&steps),
            vec!["C001R002", "C002R002", "C002R001", "C001R001"]
        );
    }

    #[test]
    fn every_hole_appears_exactly_once() {
        let collection = grid(5, 7);
        let steps = PathPlanner::default()
            .plan(&collection, &layout_at(0.0), None)
            .unwrap();
        assert_eq!(steps.len(), 35);
        let mut seen: Vec<&str> = steps.iter().flat_map(|s| s.hole_ids()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 35);
    }

    #[test]
    fn step_indices_are_sequential() {
        let steps = PathPlanner::default()
            .plan(&grid(3, 3), &layout_at(0.0), None)
            .unwrap();
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.index, i);
        }
    }

    #[test]
    fn empty_scope_plans_an_empty_path() {
        let planner = PathPlanner::default();
        let steps = planner
            .plan(&HoleCollection::new(), &layout_at(0.0), None)
            .unwrap();
        assert!(steps.is_empty());
        assert!(matches!(
            planner.plan_strict(&HoleCollection::new(), &layout_at(0.0), None),
            Err(PathError::EmptyInput)
        ));
    }

    #[test]
    fn unnumbered_hole_is_rejected() {
        let mut collection = grid(1, 1);
        collection.insert(Hole::new("RAW", 50.0, 50.0, 8.865));
        let err = PathPlanner::default()
            .plan(&collection, &layout_at(0.0), None)
            .unwrap_err();
        assert!(matches!(err, PathError::Unnumbered { hole_id } if hole_id == "RAW"));
    }

    #[test]
    fn sector_filter_scopes_the_plan() {
        let mut collection = grid(2, 2);
        collection.get_mut("C001R001").unwrap().sector = 1;
        let steps = PathPlanner::default()
            .plan(&collection, &layout_at(0.0), Some(1))
            .unwrap();
        assert_eq!(ids(&steps), vec!["C001R001"]);
    }

    #[test]
    fn interval_pairing_combines_columns() {
        let planner = PathPlanner::new(PathSettings {
            pairing_enabled: true,
            pair_interval: 2,
        });
        // One row of 4 columns: (1,3) pair, (2,4) pair.
        let steps = planner.plan(&grid(1, 4), &layout_at(0.0), None).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].hole_id, "C001R001");
        assert_eq!(steps[0].paired_id.as_deref(), Some("C003R001"));
        assert_eq!(steps[1].hole_id, "C002R001");
        assert_eq!(steps[1].paired_id.as_deref(), Some("C004R001"));
    }

    #[test]
    fn unpairable_columns_fall_back_to_singletons() {
        let planner = PathPlanner::new(PathSettings {
            pairing_enabled: true,
            pair_interval: 4,
        });
        // 3 columns: no hole 4 apart from any other; all singletons.
        let steps = planner.plan(&grid(1, 3), &layout_at(0.0), None).unwrap();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.paired_id.is_none()));
    }

    #[test]
    fn pairing_covers_every_hole_exactly_once() {
        let planner = PathPlanner::new(PathSettings {
            pairing_enabled: true,
            pair_interval: 4,
        });
        let collection = grid(3, 10);
        let steps = planner.plan(&collection, &layout_at(0.0), None).unwrap();
        let mut seen: Vec<&str> = steps.iter().flat_map(|s| s.hole_ids()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 30);
        // 10 columns pair as (1,5)(2,6)(3,7)(4,8) plus singletons 9, 10
        // per row in the left-to-right rows.
        assert!(steps.len() < 30);
    }

    #[test]
    fn pairing_follows_traversal_direction() {
        let planner = PathPlanner::new(PathSettings {
            pairing_enabled: true,
            pair_interval: 2,
        });
        let steps = planner.plan(&grid(2, 4), &layout_at(0.0), None).unwrap();
        // Row 2 runs right-to-left: the partner sits 2 columns to the left.
        let row2: Vec<&PathStep> = steps
            .iter()
            .filter(|s| s.hole_id.ends_with("R002"))
            .collect();
        assert_eq!(row2[0].hole_id, "C004R002");
        assert_eq!(row2[0].paired_id.as_deref(), Some("C002R002"));
        assert_eq!(row2[1].hole_id, "C003R002");
        assert_eq!(row2[1].paired_id.as_deref(), Some("C001R002"));
    }
}
