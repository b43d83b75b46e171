//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on macOS and in CI environments without Linux.

use crate::collector::traits::FileSystem;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory. Directory listings come back
/// sorted by path, which keeps thread enumeration order deterministic.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: BTreeMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: BTreeSet<PathBuf>,
}

/// Builds a full 52-field `/proc/[pid]/stat` record.
///
/// Only the fields the collectors read are parameters; the rest carry
/// plausible constants.
pub fn stat_record(id: u32, comm: &str, utime: u64, stime: u64, processor: i32) -> String {
    format!(
        "{id} ({comm}) S 1 {id} {id} 0 -1 4194560 100 0 0 0 {utime} {stime} 0 0 20 0 1 0 100000 12345678 500 18446744073709551615 1 1 0 0 0 0 0 0 0 0 0 0 17 {processor} 0 0 0 0 0 0 0 0 0 0 0 0 0\n"
    )
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Removes a file, leaving its directory in place.
    ///
    /// Simulates a thread exiting between the directory listing and the read.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    /// Writes `/proc/stat` with the given aggregate counters.
    ///
    /// Columns past `idle` are zero; two per-CPU lines and a few unrelated
    /// records are added so parsers see a realistic file.
    pub fn add_system_stat(&mut self, user: u64, nice: u64, system: u64, idle: u64) {
        self.add_file(
            "/proc/stat",
            format!(
                "\
cpu  {user} {nice} {system} {idle} 0 0 0 0 0 0
cpu0 {} {} {} {} 0 0 0 0 0 0
cpu1 {} {} {} {} 0 0 0 0 0 0
intr 1000000 50 0 0 0
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
                user / 2,
                nice / 2,
                system / 2,
                idle / 2,
                user - user / 2,
                nice - nice / 2,
                system - system / 2,
                idle - idle / 2,
            ),
        );
    }

    /// Adds a `stat` record for a process (`tid == None`) or one of its threads.
    ///
    /// The thread form also creates the `/proc/[pid]/task/[tid]` directory the
    /// thread enumerator lists.
    pub fn add_task(
        &mut self,
        pid: u32,
        tid: Option<u32>,
        comm: &str,
        utime: u64,
        stime: u64,
        processor: i32,
    ) {
        match tid {
            Some(tid) => self.add_file(
                format!("/proc/{}/task/{}/stat", pid, tid),
                stat_record(tid, comm, utime, stime, processor),
            ),
            None => self.add_file(
                format!("/proc/{}/stat", pid),
                stat_record(pid, comm, utime, stime, processor),
            ),
        }
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = BTreeSet::new();

        // Find all files and directories that are direct children
        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        Ok(entries.into_iter().collect())
    }
}
