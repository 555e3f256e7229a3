//! Application-wide event distribution.
//!
//! The pipeline and the inspection driver publish [`InspectionEvent`]s;
//! consumers subscribe with synchronous handlers or poll a broadcast
//! receiver from an async task.

mod bus;
mod events;

pub use bus::{EventBus, EventBusConfig, EventBusError, EventFilter, SubscriptionId};
pub use events::{
    EventCategory, GeometryEvent, InspectionEvent, PathEvent, ProgressEvent, StatusEvent,
};
