//! Collectors for the Linux `/proc` filesystem.
//!
//! This module provides parsers and collectors for reading system-wide and
//! per-task CPU accounting from the `/proc` virtual filesystem.

pub mod parser;
pub mod system;
pub mod task;

pub use parser::{ParseError, TaskStatFields};
pub use system::SystemCollector;
pub use task::{CollectError, TaskCollector, ThreadIds};
