//! # Platescan Inspect
//!
//! The back half of the inspection pipeline: everything that happens once
//! a numbered hole collection exists.
//!
//! ## Components
//!
//! - **Partitioner**: assigns every hole to one of N angular sectors
//!   (2..=12) around a center point.
//! - **Progress tracker**: per-sector and global status counters with
//!   coalesced, atomically-published flushes.
//! - **Path planner**: serpentine (snake) traversal order per sector,
//!   with optional interval pairing.
//! - **Simulation driver**: a single-writer async loop that sweeps a
//!   planned path, resolving each hole to a terminal status.

pub mod partition;
pub mod path;
pub mod progress;
pub mod sim;

pub use partition::{SectorPartitioner, MAX_SECTORS, MIN_SECTORS};
pub use path::PathPlanner;
pub use progress::SectorProgressTracker;
pub use sim::{QualifyFn, SimulationDriver, SimulationSettings};
