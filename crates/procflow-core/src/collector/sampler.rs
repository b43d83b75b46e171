//! Sampler that combines the system and task collectors into a `Snapshot`.
//!
//! Read failures never abort a sample: they are logged and the affected
//! subject keeps zero-valued counters.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::collector::procfs::{SystemCollector, TaskCollector, ThreadIds};
use crate::collector::traits::FileSystem;
use crate::model::{Snapshot, ThreadSample};

/// Maximum number of threads kept per snapshot.
pub const MAX_THREADS: usize = 32;

/// Takes snapshots of one process: system counters, process counters and
/// per-thread counters.
pub struct Sampler<F: FileSystem + Clone> {
    pid: u32,
    max_threads: usize,
    system_collector: SystemCollector<F>,
    task_collector: TaskCollector<F>,
}

impl<F: FileSystem + Clone> Sampler<F> {
    /// Creates a new sampler.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    /// * `pid` - Process to monitor
    pub fn new(fs: F, proc_path: impl Into<String>, pid: u32) -> Self {
        let proc_path = proc_path.into();
        Self {
            pid,
            max_threads: MAX_THREADS,
            system_collector: SystemCollector::new(fs.clone(), &proc_path),
            task_collector: TaskCollector::new(fs, &proc_path),
        }
    }

    /// Overrides the per-snapshot thread cap.
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Returns `true` if the monitored process currently has a `/proc` entry.
    pub fn process_exists(&self) -> bool {
        self.task_collector.process_exists(self.pid)
    }

    /// Samples everything once.
    ///
    /// System counters, process counters, thread list, then each thread in
    /// listing order.
    pub fn sample(&self) -> Snapshot {
        let start = Instant::now();
        let pid = self.pid;

        let system = self
            .system_collector
            .read_system_counters()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to read system cpu counters");
                Default::default()
            });

        let process = self
            .task_collector
            .read_task_counters(pid, None)
            .unwrap_or_else(|e| {
                warn!(pid, error = %e, "failed to read process counters");
                Default::default()
            });

        let thread_ids = self
            .task_collector
            .list_thread_ids(pid, self.max_threads)
            .unwrap_or_else(|e| {
                warn!(pid, error = %e, "failed to list threads");
                ThreadIds::default()
            });

        if thread_ids.dropped > 0 {
            debug!(
                pid,
                kept = thread_ids.ids.len(),
                dropped = thread_ids.dropped,
                "thread limit reached"
            );
        }

        let threads = thread_ids
            .ids
            .into_iter()
            .map(|tid| {
                let counters = self
                    .task_collector
                    .read_task_counters(pid, Some(tid))
                    .unwrap_or_else(|e| {
                        warn!(pid, tid, error = %e, "failed to read thread counters");
                        Default::default()
                    });
                ThreadSample { tid, counters }
            })
            .collect::<Vec<_>>();

        trace!(
            pid,
            threads = threads.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "snapshot sampled"
        );

        Snapshot {
            system,
            process,
            threads,
            threads_dropped: thread_ids.dropped,
        }
    }
}
