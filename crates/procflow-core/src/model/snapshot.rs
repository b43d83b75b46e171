//! Everything sampled at one instant.

use super::system::SystemCpuCounters;
use super::task::TaskCounters;

/// One enumerated thread and the counters read for it.
///
/// `tid` comes from the `task/` directory listing, so a thread whose stat
/// record could not be read keeps its identity while `counters` stays empty.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ThreadSample {
    pub tid: u32,
    pub counters: TaskCounters,
}

/// System, process and per-thread counters taken at a single instant.
///
/// Built fresh by the sampler, moved into the reporter and dropped at the end
/// of the reporting cycle.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Aggregate CPU counters.
    pub system: SystemCpuCounters,

    /// Counters of the monitored process as a whole.
    pub process: TaskCounters,

    /// Threads in enumeration order, capped by the sampler's thread limit.
    pub threads: Vec<ThreadSample>,

    /// Threads that were enumerated but did not fit under the cap.
    pub threads_dropped: usize,
}

impl Snapshot {
    /// Looks up a thread by ID, first match in enumeration order.
    pub fn thread(&self, tid: u32) -> Option<&ThreadSample> {
        self.threads.iter().find(|t| t.tid == tid)
    }
}
