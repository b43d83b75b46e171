//! System-wide CPU counters.

/// Aggregate CPU time counters from the `cpu` line of `/proc/stat`.
///
/// Every field is cumulative since boot, in clock ticks (USER_HZ), and never
/// decreases between two snapshots of the same boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SystemCpuCounters {
    /// Time spent in user mode.
    /// Source: `/proc/stat` column 1
    pub user: u64,

    /// Time spent in user mode with low priority (nice).
    /// Source: `/proc/stat` column 2
    pub nice: u64,

    /// Time spent in system/kernel mode.
    /// Source: `/proc/stat` column 3
    pub system: u64,

    /// Time spent idle.
    /// Source: `/proc/stat` column 4
    pub idle: u64,

    /// Time waiting for I/O to complete.
    /// Source: `/proc/stat` column 5
    pub iowait: u64,

    /// Time servicing hardware interrupts.
    /// Source: `/proc/stat` column 6
    pub irq: u64,

    /// Time servicing software interrupts.
    /// Source: `/proc/stat` column 7
    pub softirq: u64,

    /// Time stolen by the hypervisor for other VMs.
    /// Source: `/proc/stat` column 8
    pub steal: u64,

    /// Time spent running a guest OS.
    /// Source: `/proc/stat` column 9
    pub guest: u64,

    /// Time spent running a niced guest OS.
    /// Source: `/proc/stat` column 10
    pub guest_nice: u64,
}
