//! Coordinate normalization.
//!
//! Everything downstream of extraction (numbering, partitioning, path
//! planning) assumes one convention: X right, Y up, angles measured
//! counter-clockwise from +X. Drawings exported with a device-style
//! Y-down axis, or rotated on the sheet, are brought into that convention
//! here — once, before anything computes an angle.

use platescan_core::{Hole, HoleCollection, NormalizationSettings};

/// Normalize a collection into the engine's coordinate convention.
///
/// `flip_y` mirrors the collection about its horizontal center line
/// (converting a Y-down drawing into Y-up); `rotation_degrees` then
/// rotates the whole collection counter-clockwise about its bounding-box
/// centroid. Hole ids, numbering, sector, and status are carried over
/// untouched.
///
/// This is a pure function with no hidden configuration. Calling it with
/// `rotation_degrees == 0.0` and `flip_y == false` is a no-op. Repeated
/// calls with a non-zero rotation compound — that is by design, and
/// callers must guard against applying the normalization pass twice.
pub fn normalize(
    collection: &HoleCollection,
    rotation_degrees: f64,
    flip_y: bool,
) -> HoleCollection {
    let bounds = match collection.compute_bounds() {
        Some(b) => b,
        None => return collection.clone(),
    };
    let (cx, cy) = bounds.centroid();

    let theta = rotation_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();

    collection
        .iter()
        .map(|hole| {
            let x = hole.center_x;
            let y = if flip_y { 2.0 * cy - hole.center_y } else { hole.center_y };

            // Rotate about the centroid.
            let dx = x - cx;
            let dy = y - cy;
            let rx = cx + dx * cos - dy * sin;
            let ry = cy + dx * sin + dy * cos;

            Hole {
                center_x: rx,
                center_y: ry,
                ..hole.clone()
            }
        })
        .collect()
}

/// [`normalize`] driven by a settings struct.
pub fn normalize_with(
    collection: &HoleCollection,
    settings: &NormalizationSettings,
) -> HoleCollection {
    normalize(collection, settings.rotation_degrees, settings.flip_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use platescan_core::Hole;

    fn collection_of(points: &[(f64, f64)]) -> HoleCollection {
        points
            .iter()
            .enumerate()
            .map(|(i, (x, y))| Hole::new(format!("H{:04}", i + 1), *x, *y, 8.865))
            .collect()
    }

    fn center_of(c: &HoleCollection, id: &str) -> (f64, f64) {
        let h = c.get(id).unwrap();
        (h.center_x, h.center_y)
    }

    #[test]
    fn identity_normalization_is_a_noop() {
        let original = collection_of(&[(0.0, 0.0), (100.0, 50.0)]);
        let normalized = normalize(&original, 0.0, false);
        for hole in original.iter() {
            let (x, y) = center_of(&normalized, &hole.id);
            assert_eq!((x, y), (hole.center_x, hole.center_y));
        }
    }

    #[test]
    fn flip_mirrors_about_the_horizontal_center_line() {
        // Centroid y = 50.
        let original = collection_of(&[(0.0, 0.0), (0.0, 100.0), (10.0, 25.0)]);
        let flipped = normalize(&original, 0.0, true);
        assert_eq!(center_of(&flipped, "H0001"), (0.0, 100.0));
        assert_eq!(center_of(&flipped, "H0002"), (0.0, 0.0));
        assert_eq!(center_of(&flipped, "H0003"), (10.0, 75.0));
    }

    #[test]
    fn double_flip_restores_the_original() {
        let original = collection_of(&[(3.0, 1.0), (9.0, 8.0), (-2.0, 4.0)]);
        let back = normalize(&normalize(&original, 0.0, true), 0.0, true);
        for hole in original.iter() {
            let (x, y) = center_of(&back, &hole.id);
            assert!((x - hole.center_x).abs() < 1e-9);
            assert!((y - hole.center_y).abs() < 1e-9);
        }
    }

    #[test]
    fn rotation_is_counter_clockwise_about_the_centroid() {
        // Centroid at (100, 100); H0002 sits 100 right of it.
        let original = collection_of(&[(0.0, 0.0), (200.0, 0.0), (0.0, 200.0), (200.0, 200.0)]);
        let rotated = normalize(&original, 90.0, false);
        // (200, 0) is at (+100, -100) from the centroid; CCW 90 deg takes
        // it to (+100, +100), i.e. (200, 200).
        let (x, y) = center_of(&rotated, "H0002");
        assert!((x - 200.0).abs() < 1e-9);
        assert!((y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_rotation_compounds() {
        let original = collection_of(&[(0.0, 0.0), (200.0, 0.0), (0.0, 200.0), (200.0, 200.0)]);
        let twice = normalize(&normalize(&original, 90.0, false), 90.0, false);
        let once_180 = normalize(&original, 180.0, false);
        for hole in original.iter() {
            let (ax, ay) = center_of(&twice, &hole.id);
            let (bx, by) = center_of(&once_180, &hole.id);
            assert!((ax - bx).abs() < 1e-9);
            assert!((ay - by).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_collection_passes_through() {
        let empty = HoleCollection::new();
        assert!(normalize(&empty, 90.0, true).is_empty());
    }

    #[test]
    fn status_and_numbering_survive_normalization() {
        let mut original = collection_of(&[(0.0, 0.0), (10.0, 10.0)]);
        {
            let hole = original.get_mut("H0001").unwrap();
            hole.row = 3;
            hole.column = 7;
            hole.status = platescan_core::HoleStatus::Qualified;
        }
        let normalized = normalize(&original, 45.0, true);
        let hole = normalized.get("H0001").unwrap();
        assert_eq!(hole.row, 3);
        assert_eq!(hole.column, 7);
        assert_eq!(hole.status, platescan_core::HoleStatus::Qualified);
    }
}
