//! Pre-built mock filesystem scenarios for testing.
//!
//! `busy_process` and `busy_process_later` are two samples of the same
//! process 100 ms apart; between them thread 4244 exits and 4245 starts.

use super::filesystem::MockFs;

impl MockFs {
    /// PID of the process in the `busy_process*` scenarios.
    pub const BUSY_PID: u32 = 4242;

    /// First sample of a three-thread process.
    ///
    /// System: user 100, nice 0, system 50, idle 850.
    /// Process 4242 "worker": utime 20, stime 4, last on CPU 1.
    /// Threads 4242, 4243, 4244.
    pub fn busy_process() -> Self {
        let pid = Self::BUSY_PID;
        let mut fs = Self::new();

        fs.add_system_stat(100, 0, 50, 850);
        fs.add_task(pid, None, "worker", 20, 4, 1);
        fs.add_task(pid, Some(4242), "worker", 8, 2, 0);
        fs.add_task(pid, Some(4243), "worker-1", 10, 2, 2);
        fs.add_task(pid, Some(4244), "worker-2", 2, 0, 3);

        fs
    }

    /// Second sample, 25 system ticks after [`MockFs::busy_process`].
    ///
    /// System: user 110, nice 0, system 55, idle 860.
    /// Process: utime 25, stime 5, last on CPU 3.
    /// Threads 4242 and 4243 advanced (4243 migrated to CPU 1),
    /// 4244 exited, 4245 appeared.
    pub fn busy_process_later() -> Self {
        let pid = Self::BUSY_PID;
        let mut fs = Self::new();

        fs.add_system_stat(110, 0, 55, 860);
        fs.add_task(pid, None, "worker", 25, 5, 3);
        fs.add_task(pid, Some(4242), "worker", 9, 2, 0);
        fs.add_task(pid, Some(4243), "worker-1", 13, 3, 1);
        fs.add_task(pid, Some(4245), "worker-3", 1, 0, 2);

        fs
    }

    /// A process whose thread 4243 vanished after the directory listing:
    /// the task directory is still there but its `stat` is gone.
    pub fn busy_process_with_vanished_thread() -> Self {
        let mut fs = Self::busy_process();
        fs.remove_file(format!("/proc/{}/task/4243/stat", Self::BUSY_PID));
        fs
    }

    /// A process with `count` idle threads, TIDs `pid..pid + count`.
    pub fn many_threads(pid: u32, count: u32) -> Self {
        let mut fs = Self::new();

        fs.add_system_stat(1000, 0, 500, 8500);
        fs.add_task(pid, None, "pool", 0, 0, 0);
        for tid in pid..pid + count {
            fs.add_task(pid, Some(tid), "pool-worker", 0, 0, 0);
        }

        fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::traits::FileSystem;
    use std::path::Path;

    #[test]
    fn test_busy_process_layout() {
        let fs = MockFs::busy_process();

        assert!(fs.exists(Path::new("/proc/stat")));
        assert!(fs.exists(Path::new("/proc/4242/stat")));
        assert!(fs.exists(Path::new("/proc/4242/task/4244/stat")));
        assert_eq!(fs.read_dir(Path::new("/proc/4242/task")).unwrap().len(), 3);
    }

    #[test]
    fn test_busy_process_later_thread_turnover() {
        let fs = MockFs::busy_process_later();

        assert!(!fs.exists(Path::new("/proc/4242/task/4244")));
        assert!(fs.exists(Path::new("/proc/4242/task/4245/stat")));
    }

    #[test]
    fn test_vanished_thread_keeps_directory() {
        let fs = MockFs::busy_process_with_vanished_thread();

        assert!(fs.exists(Path::new("/proc/4242/task/4243")));
        assert!(!fs.exists(Path::new("/proc/4242/task/4243/stat")));
    }

    #[test]
    fn test_many_threads() {
        let fs = MockFs::many_threads(500, 5);
        assert_eq!(fs.read_dir(Path::new("/proc/500/task")).unwrap().len(), 5);
    }
}
