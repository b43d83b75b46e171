//! Per-task (process or thread) CPU counters.

/// Upper bound on the stored task name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// CPU accounting for one schedulable entity at one instant.
///
/// Source: `/proc/[pid]/stat` for the process as a whole, or
/// `/proc/[pid]/task/[tid]/stat` for a single thread.
///
/// The all-default value stands for "could not be read"; see [`Self::is_empty`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TaskCounters {
    /// Process or thread ID (field 1).
    pub id: u32,

    /// Command name without the surrounding parentheses (field 2),
    /// at most [`MAX_NAME_LEN`] characters.
    pub name: String,

    /// Ticks spent in user mode (field 14).
    pub utime: u64,

    /// Ticks spent in kernel mode (field 15).
    pub stime: u64,

    /// CPU the task last ran on (field 39).
    pub processor: i32,
}

impl TaskCounters {
    /// Returns `true` if nothing was read for this task.
    pub fn is_empty(&self) -> bool {
        self.id == 0
            && self.name.is_empty()
            && self.utime == 0
            && self.stime == 0
            && self.processor == 0
    }
}
