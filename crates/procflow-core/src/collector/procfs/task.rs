//! Task collector for per-process and per-thread counters from `/proc/[pid]/`.

use crate::collector::procfs::parser::{ParseError, tokenize_task_stat};
use crate::collector::traits::FileSystem;
use crate::model::TaskCounters;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// The file or directory could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The record was present but could not be interpreted.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io { source, .. } => Some(source),
            CollectError::Parse(_) => None,
        }
    }
}

impl CollectError {
    /// Wraps an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e.message)
    }
}

/// Thread IDs listed from `/proc/[pid]/task`, capped at a capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadIds {
    /// IDs in directory order, at most `capacity` of them.
    pub ids: Vec<u32>,
    /// Thread entries seen after the capacity was reached.
    pub dropped: usize,
}

/// Reads task counters and lists threads under `/proc/[pid]/`.
pub struct TaskCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> TaskCollector<F> {
    /// Creates a new task collector.
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

    /// Returns `true` if `/proc/[pid]` is present.
    pub fn process_exists(&self, pid: u32) -> bool {
        let path = format!("{}/{}", self.proc_path, pid);
        self.fs.exists(Path::new(&path))
    }

    fn stat_path(&self, pid: u32, tid: Option<u32>) -> String {
        match tid {
            Some(tid) => format!("{}/{}/task/{}/stat", self.proc_path, pid, tid),
            None => format!("{}/{}/stat", self.proc_path, pid),
        }
    }

    /// Reads the counters of a process, or of one of its threads when `tid`
    /// is given.
    ///
    /// A record that is too short to hold every extracted field is still
    /// accepted: the missing fields are zero and a warning names them. Only a
    /// record without even a leading task ID is a parse error.
    pub fn read_task_counters(
        &self,
        pid: u32,
        tid: Option<u32>,
    ) -> Result<TaskCounters, CollectError> {
        let path = self.stat_path(pid, tid);
        let content = self
            .fs
            .read_to_string(Path::new(&path))
            .map_err(|e| CollectError::io(&path, e))?;
        let fields = tokenize_task_stat(&content);

        if fields.id.is_none() {
            return Err(CollectError::Parse(format!("no task id in {}", path)));
        }
        if !fields.is_complete() {
            warn!(pid, tid = ?tid, missing = ?fields.missing(), "incomplete stat record");
        }

        Ok(fields.into_counters())
    }

    /// Lists the thread IDs of a process from `/proc/[pid]/task`.
    ///
    /// Collects at most `capacity` IDs in directory order; numeric entries past
    /// that are counted in [`ThreadIds::dropped`]. Entries that are not thread
    /// numbers are skipped.
    pub fn list_thread_ids(&self, pid: u32, capacity: usize) -> Result<ThreadIds, CollectError> {
        let path = format!("{}/{}/task", self.proc_path, pid);
        let entries = self
            .fs
            .read_dir(Path::new(&path))
            .map_err(|e| CollectError::io(&path, e))?;

        let mut threads = ThreadIds::default();

        for entry in entries {
            let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name == "." || name == ".." {
                continue;
            }
            let Ok(tid) = name.parse::<u32>() else {
                debug!(pid, entry = name, "skipping non-numeric task entry");
                continue;
            };

            if threads.ids.len() < capacity {
                threads.ids.push(tid);
            } else {
                threads.dropped += 1;
            }
        }

        Ok(threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use std::io;

    #[test]
    fn test_read_process_counters() {
        let fs = MockFs::busy_process();
        let collector = TaskCollector::new(fs, "/proc");

        let info = collector.read_task_counters(4242, None).unwrap();

        assert_eq!(info.id, 4242);
        assert_eq!(info.name, "worker");
        assert_eq!(info.utime, 20);
        assert_eq!(info.stime, 4);
        assert_eq!(info.processor, 1);
    }

    #[test]
    fn test_read_thread_counters() {
        let fs = MockFs::busy_process();
        let collector = TaskCollector::new(fs, "/proc");

        let info = collector.read_task_counters(4242, Some(4243)).unwrap();

        assert_eq!(info.id, 4243);
        assert_eq!(info.name, "worker-1");
        assert_eq!(info.utime, 10);
        assert_eq!(info.processor, 2);
    }

    #[test]
    fn test_read_task_counters_gone() {
        let fs = MockFs::busy_process();
        let collector = TaskCollector::new(fs, "/proc");

        let result = collector.read_task_counters(4242, Some(9999));
        match result {
            Err(CollectError::Io { path, source }) => {
                assert_eq!(path, PathBuf::from("/proc/4242/task/9999/stat"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_task_counters_short_record() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/77/stat", "77 (short) R 1 77 77 0 -1 0 0 0 0 0 12 3\n");
        let collector = TaskCollector::new(fs, "/proc");

        let info = collector.read_task_counters(77, None).unwrap();

        assert_eq!(info.id, 77);
        assert_eq!(info.utime, 12);
        assert_eq!(info.stime, 3);
        assert_eq!(info.processor, 0);
    }

    #[test]
    fn test_read_task_counters_garbage() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/77/stat", "\n");
        let collector = TaskCollector::new(fs, "/proc");

        let result = collector.read_task_counters(77, None);
        assert!(matches!(result, Err(CollectError::Parse(_))));
    }

    #[test]
    fn test_list_thread_ids() {
        let fs = MockFs::busy_process();
        let collector = TaskCollector::new(fs, "/proc");

        let threads = collector.list_thread_ids(4242, 32).unwrap();

        assert_eq!(threads.ids, vec![4242, 4243, 4244]);
        assert_eq!(threads.dropped, 0);
    }

    #[test]
    fn test_list_thread_ids_capacity() {
        let fs = MockFs::many_threads(1000, 40);
        let collector = TaskCollector::new(fs, "/proc");

        let threads = collector.list_thread_ids(1000, 32).unwrap();

        assert_eq!(threads.ids.len(), 32);
        assert_eq!(threads.dropped, 8);

        let none = collector.list_thread_ids(1000, 0).unwrap();
        assert!(none.ids.is_empty());
        assert_eq!(none.dropped, 40);
    }

    #[test]
    fn test_list_thread_ids_skips_non_numeric() {
        let mut fs = MockFs::new();
        fs.add_dir("/proc/5/task/5");
        fs.add_file("/proc/5/task/README", "");
        let collector = TaskCollector::new(fs, "/proc");

        let threads = collector.list_thread_ids(5, 32).unwrap();

        assert_eq!(threads.ids, vec![5]);
    }

    #[test]
    fn test_list_thread_ids_missing_process() {
        let collector = TaskCollector::new(MockFs::new(), "/proc");
        let result = collector.list_thread_ids(31337, 32);
        assert!(matches!(result, Err(CollectError::Io { .. })));
    }

    #[test]
    fn test_process_exists() {
        let collector = TaskCollector::new(MockFs::busy_process(), "/proc");
        assert!(collector.process_exists(4242));
        assert!(!collector.process_exists(1));
    }

    #[test]
    fn test_collect_error_display() {
        let err = CollectError::from(ParseError::new("bad"));
        assert_eq!(err.to_string(), "parse error: bad");

        let err = CollectError::io(
            "/proc/7/task/8/stat",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "I/O error on /proc/7/task/8/stat: gone");
        assert!(std::error::Error::source(&err).is_some());
    }
}
