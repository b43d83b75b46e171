//! Data models for one sampling instant.
//!
//! - [`system`]: system-wide CPU counters from `/proc/stat`
//! - [`task`]: per-process and per-thread counters from `/proc/[pid]/stat`
//! - [`snapshot`]: everything sampled at one instant
//!
//! All counters are cumulative clock ticks; percentages only exist after two
//! snapshots are compared by [`crate::report`].

mod snapshot;
mod system;
mod task;

pub use snapshot::{Snapshot, ThreadSample};
pub use system::SystemCpuCounters;
pub use task::{MAX_NAME_LEN, TaskCounters};
