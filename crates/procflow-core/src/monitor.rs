//! The reporting loop: sample, sleep, sample, report, repeat.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::collector::{FileSystem, Sampler};
use crate::report::DeltaReport;

/// Time between the two snapshots of one cycle.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Drives a [`Sampler`] in reporting cycles.
pub struct Monitor<F: FileSystem + Clone> {
    sampler: Sampler<F>,
    interval: Duration,
}

impl<F: FileSystem + Clone> Monitor<F> {
    pub fn new(sampler: Sampler<F>) -> Self {
        Self {
            sampler,
            interval: SAMPLE_INTERVAL,
        }
    }

    /// Replaces [`SAMPLE_INTERVAL`]; tests use a zero interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs one cycle: two snapshots `interval` apart, then their report.
    ///
    /// Both snapshots are dropped once the report is built.
    pub fn cycle(&self) -> DeltaReport {
        let before = self.sampler.sample();
        std::thread::sleep(self.interval);
        let after = self.sampler.sample();
        DeltaReport::compute(&before, &after)
    }

    /// Writes one report per cycle to `out` while `running` is set.
    ///
    /// `running` is checked before each cycle, so clearing it lets the current
    /// cycle finish. Returns the number of completed cycles; only a failing
    /// writer ends the loop with an error.
    pub fn run<W: Write>(&self, running: &AtomicBool, out: &mut W) -> io::Result<u64> {
        let pid = self.sampler.pid();
        if !self.sampler.process_exists() {
            warn!(pid, "process not found, counters will read as zero");
        }
        info!(
            pid,
            interval_ms = self.interval.as_millis() as u64,
            max_threads = self.sampler.max_threads(),
            "starting sampling loop"
        );

        let mut cycles: u64 = 0;
        while running.load(Ordering::SeqCst) {
            let report = self.cycle();
            write!(out, "{}", report)?;
            out.flush()?;

            cycles += 1;
            debug!(
                cycle = cycles,
                total_ticks = report.total_ticks,
                threads = report.threads.len(),
                "report written"
            );
        }

        info!(cycles, "sampling loop stopped");
        Ok(cycles)
    }
}
