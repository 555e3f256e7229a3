//! Data model: holes, collections, CAD primitives, progress aggregates,
//! and path steps.

pub mod collection;
pub mod hole;
pub mod path;
pub mod primitives;
pub mod progress;

pub use collection::{Bounds, HoleCollection};
pub use hole::{Hole, HoleStatus, SectorId, SectorLayout, SectorSpan};
pub use path::PathStep;
pub use primitives::CadPrimitive;
pub use progress::{SectorProgress, StatusCounts};
