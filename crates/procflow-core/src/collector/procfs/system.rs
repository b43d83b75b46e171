//! System collector for the aggregate CPU counters in `/proc/stat`.

use crate::collector::procfs::parser::parse_system_counters;
use crate::collector::procfs::task::CollectError;
use crate::collector::traits::FileSystem;
use crate::model::SystemCpuCounters;
use std::path::Path;

/// Collects system-wide CPU counters from `/proc/stat`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Reads the aggregate `cpu` line of `/proc/stat`.
    pub fn read_system_counters(&self) -> Result<SystemCpuCounters, CollectError> {
        let path = format!("{}/stat", self.proc_path);
        let content = self
            .fs
            .read_to_string(Path::new(&path))
            .map_err(|e| CollectError::io(&path, e))?;
        Ok(parse_system_counters(&content)?)
    }
}
