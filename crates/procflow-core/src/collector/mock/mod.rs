//! Mock filesystem support for testing without a real `/proc`.
//!
//! - [`MockFs`]: in-memory filesystem implementing [`FileSystem`](super::FileSystem)
//! - scenarios: canned `/proc` states (`busy_process`, `many_threads`, ...)

mod filesystem;
mod scenarios;

pub use filesystem::{MockFs, stat_record};
