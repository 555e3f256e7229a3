//! # Platescan Core
//!
//! Core types and utilities for the platescan inspection engine:
//! the hole data model, component-scoped errors, engine configuration,
//! and the inspection event bus.
//!
//! The geometry pipeline lives in `platescan-geometry`; partitioning,
//! progress tracking, and path planning live in `platescan-inspect`.

pub mod config;
pub mod data;
pub mod error;
pub mod event_bus;
pub mod types;

pub use config::{
    EngineConfig, ExtractionTolerances, NormalizationSettings, NumberingSettings,
    PartitionSettings, PathSettings, ProgressSettings,
};
pub use data::{
    Bounds, CadPrimitive, Hole, HoleCollection, HoleStatus, PathStep, SectorId, SectorLayout,
    SectorProgress, SectorSpan, StatusCounts,
};
pub use error::{Error, GeometryError, NumberingError, PartitionError, PathError, Result};
pub use event_bus::{
    EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter, GeometryEvent,
    InspectionEvent, PathEvent, ProgressEvent, StatusEvent, SubscriptionId,
};
pub use types::{thread_safe, thread_safe_rw, ThreadSafe, ThreadSafeRw};
