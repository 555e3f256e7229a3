//! Raw CAD primitives handed to the geometry extractor.
//!
//! The CAD loader (DXF reader or any other front end) produces a flat list
//! of these records; the extractor owns all interpretation.

use serde::{Deserialize, Serialize};

/// One circular CAD entity: either a full circle or an arc.
///
/// Angles are in degrees, counter-clockwise, in the drawing's own
/// convention; normalization happens after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CadPrimitive {
    /// A full circle.
    Circle {
        /// Center x.
        center_x: f64,
        /// Center y.
        center_y: f64,
        /// Radius.
        radius: f64,
    },
    /// A circular arc from `start_angle` to `end_angle`.
    Arc {
        /// Center x.
        center_x: f64,
        /// Center y.
        center_y: f64,
        /// Radius.
        radius: f64,
        /// Start angle in degrees.
        start_angle: f64,
        /// End angle in degrees.
        end_angle: f64,
    },
}

impl CadPrimitive {
    /// Center of the primitive.
    pub fn center(&self) -> (f64, f64) {
        match self {
            Self::Circle {
                center_x, center_y, ..
            }
            | Self::Arc {
                center_x, center_y, ..
            } => (*center_x, *center_y),
        }
    }

    /// Radius of the primitive.
    pub fn radius(&self) -> f64 {
        match self {
            Self::Circle { radius, .. } | Self::Arc { radius, .. } => *radius,
        }
    }

    /// Angular span in degrees: 360 for circles, the swept angle for arcs.
    ///
    /// An arc whose end equals its start is treated as a full circle, the
    /// same reading DXF gives a 0/360 arc.
    pub fn span_degrees(&self) -> f64 {
        match self {
            Self::Circle { .. } => 360.0,
            Self::Arc {
                start_angle,
                end_angle,
                ..
            } => {
                let span = (end_angle - start_angle).rem_euclid(360.0);
                if span == 0.0 {
                    360.0
                } else {
                    span
                }
            }
        }
    }
}
