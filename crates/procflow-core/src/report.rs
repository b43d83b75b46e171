//! Delta computation between two snapshots.
//!
//! All percentages share one denominator: the sum of the user, nice, system
//! and idle deltas of the aggregate CPU line. iowait, irq, softirq, steal and
//! the guest columns are not part of it.
//!
//! Threads are correlated by TID, driven by the first snapshot: a thread must
//! be listed in both to be reported.

use std::fmt;

use crate::fmt::format_percent;
use crate::model::{Snapshot, TaskCounters, ThreadSample};

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Signed difference of two cumulative tick counters.
pub fn tick_delta(curr: u64, prev: u64) -> i64 {
    curr.wrapping_sub(prev) as i64
}

/// `ticks` as a percentage of `total`.
///
/// A zero `total` gives `NaN` or an infinity; callers print it as is.
pub fn percent_of(ticks: i64, total: i64) -> f64 {
    ticks as f64 * 100.0 / total as f64
}

// ---------------------------------------------------------------------------
// Report rows
// ---------------------------------------------------------------------------

/// System-wide utilization over the interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemUsage {
    pub user: f64,
    pub nice: f64,
    pub system: f64,
    pub idle: f64,
}

/// User and kernel utilization of one task over the interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TaskUsage {
    pub user: f64,
    pub system: f64,
}

/// Utilization of one thread present in both snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadUsage {
    pub tid: u32,
    /// CPU the thread last ran on, from the second snapshot.
    pub core: i32,
    pub usage: TaskUsage,
}

/// Percentages derived from two snapshots of the same process.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaReport {
    /// Denominator shared by every percentage.
    pub total_ticks: i64,
    pub system: SystemUsage,
    pub process: TaskUsage,
    /// Threads in the first snapshot's order.
    pub threads: Vec<ThreadUsage>,
}

impl DeltaReport {
    /// Computes the report for the interval between `prev` and `curr`.
    pub fn compute(prev: &Snapshot, curr: &Snapshot) -> Self {
        let user = tick_delta(curr.system.user, prev.system.user);
        let nice = tick_delta(curr.system.nice, prev.system.nice);
        let system = tick_delta(curr.system.system, prev.system.system);
        let idle = tick_delta(curr.system.idle, prev.system.idle);
        let total_ticks = user + nice + system + idle;

        let threads = correlate_threads(prev, curr)
            .map(|(before, after)| ThreadUsage {
                tid: before.tid,
                core: after.counters.processor,
                usage: task_usage(&before.counters, &after.counters, total_ticks),
            })
            .collect();

        Self {
            total_ticks,
            system: SystemUsage {
                user: percent_of(user, total_ticks),
                nice: percent_of(nice, total_ticks),
                system: percent_of(system, total_ticks),
                idle: percent_of(idle, total_ticks),
            },
            process: task_usage(&prev.process, &curr.process, total_ticks),
            threads,
        }
    }
}

/// Pairs every thread of `prev` with the first thread of `curr` that has the
/// same TID.
///
/// Threads that exited (only in `prev`) or started (only in `curr`) during
/// the interval are not yielded.
pub fn correlate_threads<'a>(
    prev: &'a Snapshot,
    curr: &'a Snapshot,
) -> impl Iterator<Item = (&'a ThreadSample, &'a ThreadSample)> {
    prev.threads
        .iter()
        .filter_map(move |before| curr.thread(before.tid).map(|after| (before, after)))
}

/// Task usage over the interval; zero when either side could not be read.
fn task_usage(prev: &TaskCounters, curr: &TaskCounters, total_ticks: i64) -> TaskUsage {
    if prev.is_empty() || curr.is_empty() {
        return TaskUsage::default();
    }

    TaskUsage {
        user: percent_of(tick_delta(curr.utime, prev.utime), total_ticks),
        system: percent_of(tick_delta(curr.stime, prev.stime), total_ticks),
    }
}

impl fmt::Display for DeltaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total : user = {}, nice = {}, system = {}, idle = {}",
            format_percent(self.system.user),
            format_percent(self.system.nice),
            format_percent(self.system.system),
            format_percent(self.system.idle),
        )?;
        writeln!(
            f,
            "Process : user = {}, system = {}",
            format_percent(self.process.user),
            format_percent(self.process.system),
        )?;
        for thread in &self.threads {
            writeln!(
                f,
                "Thread({}) : core = {}, user = {}, system = {}",
                thread.tid,
                thread.core,
                format_percent(thread.usage.user),
                format_percent(thread.usage.system),
            )?;
        }
        Ok(())
    }
}
