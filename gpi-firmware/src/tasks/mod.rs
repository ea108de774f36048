//! Embassy async tasks
//!
//! Edge tasks stand in for the per-pin edge interrupt vectors, the tick
//! task for the shared timer vector.

pub mod edge;
pub mod report;
pub mod tick;

pub use edge::edge_task;
pub use report::report_task;
pub use tick::tick_task;
