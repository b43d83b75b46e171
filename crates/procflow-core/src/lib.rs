//! procflow-core: CPU utilization sampling for one process and its threads.
//!
//! Provides:
//! - `collector`: `/proc` readers, thread enumeration, snapshot sampling
//! - `model`: counters and snapshot structures
//! - `report`: delta computation and thread correlation between two snapshots
//! - `monitor`: the sample / sleep / sample / report loop
//! - `fmt`: percentage formatting helpers

pub mod collector;
pub mod fmt;
pub mod model;
pub mod monitor;
pub mod report;

#[cfg(test)]
mod test_support;
