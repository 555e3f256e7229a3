//! Minimal DXF entity reader.
//!
//! Extracts CIRCLE and ARC entities (the only entities the hole pipeline
//! cares about) from an ASCII DXF file, plus the `$INSUNITS` header for
//! unit scaling. Everything else in the drawing is counted and skipped.
//!
//! DXF is a flat stream of (group code, value) line pairs; an entity
//! starts at a code-0 record and runs until the next one.

use std::path::Path;

use thiserror::Error;

use platescan_core::CadPrimitive;

/// Errors from DXF reading.
#[derive(Error, Debug)]
pub enum DxfError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not a parseable DXF stream.
    #[error("DXF parse error: {0}")]
    Parse(String),

    /// The file contains no entity section at all.
    #[error("DXF file contains no entities")]
    Empty,
}

/// Drawing units from the `$INSUNITS` header variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DxfUnit {
    /// No unit specified; coordinates pass through unscaled.
    #[default]
    Unitless,
    /// Inches.
    Inches,
    /// Millimeters.
    Millimeters,
    /// Centimeters.
    Centimeters,
    /// Meters.
    Meters,
}

impl DxfUnit {
    /// Conversion factor to millimeters.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            DxfUnit::Unitless => 1.0,
            DxfUnit::Inches => 25.4,
            DxfUnit::Millimeters => 1.0,
            DxfUnit::Centimeters => 10.0,
            DxfUnit::Meters => 1000.0,
        }
    }

    fn from_insunits(code: i32) -> Self {
        match code {
            1 => DxfUnit::Inches,
            4 => DxfUnit::Millimeters,
            5 => DxfUnit::Centimeters,
            6 => DxfUnit::Meters,
            _ => DxfUnit::Unitless,
        }
    }
}

/// Parsed drawing content relevant to hole extraction.
#[derive(Debug, Clone)]
pub struct DxfDrawing {
    /// Circle and arc entities, coordinates scaled to millimeters.
    pub primitives: Vec<CadPrimitive>,
    /// Drawing units declared in the header.
    pub unit: DxfUnit,
    /// Entities of other types that were skipped.
    pub skipped_entities: usize,
}

/// Reader for plate drawings in DXF format.
pub struct DxfReader;

/// Field accumulator for the entity currently being scanned.
#[derive(Default)]
struct PendingEntity {
    kind: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    radius: Option<f64>,
    start_angle: Option<f64>,
    end_angle: Option<f64>,
}

impl PendingEntity {
    fn finish(mut self, scale: f64, drawing: &mut DxfDrawing) -> Result<(), DxfError> {
        let kind = match self.kind.take() {
            Some(k) => k,
            None => return Ok(()),
        };
        match kind.as_str() {
            "CIRCLE" => {
                let (x, y, r) = self.geometry(&kind)?;
                drawing.primitives.push(CadPrimitive::Circle {
                    center_x: x * scale,
                    center_y: y * scale,
                    radius: r * scale,
                });
            }
            "ARC" => {
                let (x, y, r) = self.geometry(&kind)?;
                drawing.primitives.push(CadPrimitive::Arc {
                    center_x: x * scale,
                    center_y: y * scale,
                    radius: r * scale,
                    start_angle: self.start_angle.unwrap_or(0.0),
                    end_angle: self.end_angle.unwrap_or(360.0),
                });
            }
            _ => drawing.skipped_entities += 1,
        }
        Ok(())
    }

    fn geometry(&self, kind: &str) -> Result<(f64, f64, f64), DxfError> {
        match (self.x, self.y, self.radius) {
            (Some(x), Some(y), Some(r)) => Ok((x, y, r)),
            _ => Err(DxfError::Parse(format!(
                "{kind} entity is missing center or radius"
            ))),
        }
    }
}

impl DxfReader {
    /// Read and parse a DXF file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<DxfDrawing, DxfError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse DXF content.
    pub fn parse(content: &str) -> Result<DxfDrawing, DxfError> {
        let mut drawing = DxfDrawing {
            primitives: Vec::new(),
            unit: DxfUnit::Unitless,
            skipped_entities: 0,
        };

        let lines: Vec<&str> = content.lines().collect();
        let mut in_entities = false;
        let mut saw_entities_section = false;
        let mut awaiting_insunits = false;
        let mut section_name_pending = false;
        let mut pending = PendingEntity::default();
        // Header values are unscaled; scale is applied when an entity is
        // finished, so $INSUNITS must precede the ENTITIES section (it
        // always does in conforming files).
        let mut scale = 1.0;

        let mut i = 0;
        while i + 1 < lines.len() {
            let code: i32 = lines[i]
                .trim()
                .parse()
                .map_err(|_| DxfError::Parse(format!("bad group code at line {}", i + 1)))?;
            let value = lines[i + 1].trim();
            i += 2;

            match code {
                0 if value == "SECTION" => {
                    section_name_pending = true;
                }
                2 if section_name_pending => {
                    section_name_pending = false;
                    in_entities = value == "ENTITIES";
                    if in_entities {
                        saw_entities_section = true;
                    }
                }
                0 if value == "ENDSEC" => {
                    if in_entities {
                        std::mem::take(&mut pending).finish(scale, &mut drawing)?;
                    }
                    in_entities = false;
                }
                9 => {
                    awaiting_insunits = value == "$INSUNITS";
                }
                70 if awaiting_insunits => {
                    let units: i32 = value.parse().map_err(|_| {
                        DxfError::Parse(format!("bad $INSUNITS value '{value}'"))
                    })?;
                    drawing.unit = DxfUnit::from_insunits(units);
                    scale = drawing.unit.to_mm_factor();
                    awaiting_insunits = false;
                }
                0 if in_entities => {
                    std::mem::take(&mut pending).finish(scale, &mut drawing)?;
                    pending.kind = Some(value.to_string());
                }
                _ if in_entities => {
                    let parse_f64 = |v: &str| {
                        v.parse::<f64>()
                            .map_err(|_| DxfError::Parse(format!("bad numeric value '{v}'")))
                    };
                    match code {
                        10 => pending.x = Some(parse_f64(value)?),
                        20 => pending.y = Some(parse_f64(value)?),
                        40 => pending.radius = Some(parse_f64(value)?),
                        50 => pending.start_angle = Some(parse_f64(value)?),
                        51 => pending.end_angle = Some(parse_f64(value)?),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        pending.finish(scale, &mut drawing)?;

        if !saw_entities_section {
            return Err(DxfError::Empty);
        }

        tracing::debug!(
            primitives = drawing.primitives.len(),
            skipped = drawing.skipped_entities,
            unit = ?drawing.unit,
            "DXF parsed"
        );
        Ok(drawing)
    }
}
