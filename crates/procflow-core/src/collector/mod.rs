//! CPU accounting collector for Linux.
//!
//! This module reads system-wide and per-task CPU counters from the Linux
//! `/proc` filesystem, with support for mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Sampler                            │
//! │  ┌─────────────────────────┐   ┌─────────────────────────┐  │
//! │  │     TaskCollector       │   │    SystemCollector      │  │
//! │  │  - /proc/[pid]/stat     │   │  - /proc/stat           │  │
//! │  │  - /proc/[pid]/task/*   │   └────────────┬────────────┘  │
//! │  └────────────┬────────────┘                │               │
//! │               └──────────────┬──────────────┘               │
//! │                       ┌──────▼──────┐                       │
//! │                       │  FileSystem │ (trait)               │
//! │                       └──────┬──────┘                       │
//! └──────────────────────────────┼──────────────────────────────┘
//!                      ┌─────────┴─────────┐
//!               ┌──────▼──────┐     ┌──────▼──────┐
//!               │   RealFs    │     │   MockFs    │
//!               │  (Linux)    │     │  (Testing)  │
//!               └─────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use procflow_core::collector::{RealFs, Sampler};
//!
//! let sampler = Sampler::new(RealFs::new(), "/proc", pid);
//! let snapshot = sampler.sample();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use procflow_core::collector::{MockFs, Sampler};
//!
//! let sampler = Sampler::new(MockFs::busy_process(), "/proc", MockFs::BUSY_PID);
//! let snapshot = sampler.sample();
//! assert_eq!(snapshot.threads.len(), 3);
//! ```

pub mod mock;
pub mod procfs;
mod sampler;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{CollectError, SystemCollector, TaskCollector, ThreadIds};
pub use sampler::{MAX_THREADS, Sampler};
pub use traits::{FileSystem, RealFs};
