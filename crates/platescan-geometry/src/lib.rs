//! # Platescan Geometry
//!
//! The front half of the inspection pipeline: turning a plate drawing
//! into a numbered hole collection.
//!
//! ## Components
//!
//! - **DXF reader**: CIRCLE/ARC entities and `$INSUNITS` scaling from an
//!   ASCII DXF file.
//! - **Extractor**: merges complementary arc pairs into holes, accepts
//!   lone circles, rejects boundary/reference circles by radius, and
//!   reports skipped primitives as diagnostics.
//! - **Normalizer**: one pure pass establishing the X-right/Y-up/CCW
//!   convention (optional flip and rotation), run before anything
//!   computes an angle.
//! - **Numberer**: clusters centers into rows/columns and assigns the
//!   canonical `C{column:03}R{row:03}` ids.
//!
//! ```text
//! DXF file -> CadPrimitive list -> extract -> normalize -> number
//! ```

pub mod dxf;
pub mod extractor;
pub mod normalizer;
pub mod numbering;

pub use dxf::{DxfDrawing, DxfError, DxfReader, DxfUnit};
pub use extractor::{ExtractionReport, GeometryExtractor, SkipReason, SkippedPrimitive};
pub use normalizer::{normalize, normalize_with};
pub use numbering::GridNumberer;
