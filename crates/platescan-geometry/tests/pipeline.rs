// Integration tests for the DXF -> extract -> normalize -> number pipeline.

use platescan_core::{EngineConfig, HoleStatus};
use platescan_geometry::{normalize_with, DxfReader, GeometryExtractor, GridNumberer};

/// A 3x2 plate drawn with arc pairs, one reference circle, and one
/// stray construction line.
fn plate_dxf() -> String {
    let mut entities = String::new();
    // Boundary circle around the plate.
    entities.push_str("0\nCIRCLE\n10\n100.0\n20\n50.0\n40\n2300.0\n");
    // Construction line, not circular at all.
    entities.push_str("0\nLINE\n10\n0.0\n20\n0.0\n11\n200.0\n21\n100.0\n");
    for row in 0..2 {
        for col in 0..3 {
            let x = col as f64 * 100.0;
            let y = row as f64 * 100.0;
            entities.push_str(&format!(
                "0\nARC\n10\n{x}\n20\n{y}\n40\n8.865\n50\n0.0\n51\n180.0\n"
            ));
            entities.push_str(&format!(
                "0\nARC\n10\n{x}\n20\n{y}\n40\n8.865\n50\n180.0\n51\n360.0\n"
            ));
        }
    }
    format!("0\nSECTION\n2\nENTITIES\n{entities}0\nENDSEC\n0\nEOF\n")
}

#[test]
fn dxf_to_numbered_collection() {
    let config = EngineConfig::for_hole_radius(8.865);

    let drawing = DxfReader::parse(&plate_dxf()).unwrap();
    assert_eq!(drawing.skipped_entities, 1); // the LINE

    let extractor = GeometryExtractor::new(config.extraction, config.expected_hole_radius);
    let report = extractor.extract(&drawing.primitives).unwrap();
    assert_eq!(report.collection.len(), 6);
    assert_eq!(report.skipped.len(), 1); // the boundary circle

    let normalized = normalize_with(&report.collection, &config.normalization);
    let numbered = GridNumberer::new(config.numbering).number(&normalized).unwrap();

    assert_eq!(numbered.len(), 6);
    let rows: std::collections::HashSet<i32> = numbered.iter().map(|h| h.row).collect();
    let cols: std::collections::HashSet<i32> = numbered.iter().map(|h| h.column).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(cols.len(), 3);

    // Bottom-left hole gets the first id; every hole is still pending.
    let origin = numbered
        .iter()
        .find(|h| h.center_x.abs() < 1e-6 && h.center_y.abs() < 1e-6)
        .unwrap();
    assert_eq!(origin.id, "C001R001");
    assert!(numbered.iter().all(|h| h.status == HoleStatus::Pending));
}

#[test]
fn flip_changes_rows_not_columns() {
    let config = EngineConfig::for_hole_radius(8.865);
    let drawing = DxfReader::parse(&plate_dxf()).unwrap();
    let extractor = GeometryExtractor::new(config.extraction, config.expected_hole_radius);
    let report = extractor.extract(&drawing.primitives).unwrap();

    let upright = GridNumberer::default().number(&report.collection).unwrap();
    let flipped_collection = platescan_geometry::normalize(&report.collection, 0.0, true);
    let flipped = GridNumberer::default().number(&flipped_collection).unwrap();

    // Flipping mirrors y about the plate's center line (y = 50 here), so a
    // physical hole at (x, y) sits at (x, 100 - y) afterwards. Its row
    // index mirrors (1 <-> 2) while its column stays put.
    for hole in upright.iter() {
        let twin = flipped
            .iter()
            .find(|h| {
                (h.center_x - hole.center_x).abs() < 1e-6
                    && (h.center_y - (100.0 - hole.center_y)).abs() < 1e-6
            })
            .unwrap();
        assert_eq!(twin.row, 3 - hole.row);
        assert_eq!(twin.column, hole.column);
    }
}

#[test]
fn renumbering_after_normalization_is_stable() {
    let config = EngineConfig::for_hole_radius(8.865);
    let drawing = DxfReader::parse(&plate_dxf()).unwrap();
    let extractor = GeometryExtractor::new(config.extraction, config.expected_hole_radius);
    let report = extractor.extract(&drawing.primitives).unwrap();
    let normalized = normalize_with(&report.collection, &config.normalization);

    let numberer = GridNumberer::new(config.numbering);
    let once = numberer.number(&normalized).unwrap();
    let twice = numberer.number(&once).unwrap();

    for hole in once.iter() {
        let again = twice.get(&hole.id).unwrap();
        assert_eq!(again.row, hole.row);
        assert_eq!(again.column, hole.column);
    }
}
