//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc` files into
//! structured data. They are designed to be easily testable with string inputs.

use crate::model::{MAX_NAME_LEN, SystemCpuCounters, TaskCounters};

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Tag of the aggregate line in `/proc/stat`.
const AGGREGATE_CPU_TAG: &str = "cpu";

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Per-CPU lines (`cpu0`, `cpu1`, ...) and all other records are ignored.
/// Columns missing from the line (older kernels report fewer than ten) or
/// that are not numbers are left at zero.
pub fn parse_system_counters(content: &str) -> Result<SystemCpuCounters, ParseError> {
    let parts: Vec<&str> = content
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .find(|parts| parts.first() == Some(&AGGREGATE_CPU_TAG))
        .ok_or_else(|| ParseError::new("missing aggregate 'cpu' line in stat"))?;

    let get_val = |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

    Ok(SystemCpuCounters {
        user: get_val(1),
        nice: get_val(2),
        system: get_val(3),
        idle: get_val(4),
        iowait: get_val(5),
        irq: get_val(6),
        softirq: get_val(7),
        steal: get_val(8),
        guest: get_val(9),
        guest_nice: get_val(10),
    })
}

// 1-based positions in `/proc/[pid]/stat`, see proc(5).
const FIELD_ID: usize = 1;
const FIELD_UTIME: usize = 14;
const FIELD_STIME: usize = 15;
const FIELD_PROCESSOR: usize = 39;

/// The fields extracted from a `/proc/[pid]/stat` record.
///
/// `None` means the record was too short to reach that position, or the token
/// there did not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStatFields {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub utime: Option<u64>,
    pub stime: Option<u64>,
    pub processor: Option<i32>,
}

impl TaskStatFields {
    /// Names of the fields that could not be extracted.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("pid");
        }
        if self.name.is_none() {
            missing.push("comm");
        }
        if self.utime.is_none() {
            missing.push("utime");
        }
        if self.stime.is_none() {
            missing.push("stime");
        }
        if self.processor.is_none() {
            missing.push("processor");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Converts to counters, absent fields becoming zero / empty.
    pub fn into_counters(self) -> TaskCounters {
        TaskCounters {
            id: self.id.unwrap_or(0),
            name: self.name.unwrap_or_default(),
            utime: self.utime.unwrap_or(0),
            stime: self.stime.unwrap_or(0),
            processor: self.processor.unwrap_or(0),
        }
    }
}

/// Splits a `/proc/[pid]/stat` record into its positional fields.
///
/// Format: `pid (comm) state ppid pgrp ...`. The comm field can contain spaces
/// and parentheses, so when the record has a parenthesized name it runs up to
/// the last `)` and counting resumes after it. A record without parentheses is
/// split on whitespace only.
fn split_stat_fields(content: &str) -> Vec<&str> {
    let content = content.trim();

    if let (Some(open), Some(close)) = (content.find('('), content.rfind(')'))
        && open < close
    {
        let mut fields = vec![content[..open].trim(), &content[open + 1..close]];
        fields.extend(content[close + 1..].split_whitespace());
        return fields;
    }

    content.split_whitespace().collect()
}

/// Extracts pid, comm, utime, stime and processor from a `/proc/[pid]/stat`
/// record.
///
/// Never fails: short or garbled records just leave fields as `None`.
pub fn tokenize_task_stat(content: &str) -> TaskStatFields {
    let fields = split_stat_fields(content);
    let field = |pos: usize| fields.get(pos - 1).copied().filter(|s| !s.is_empty());

    TaskStatFields {
        id: field(FIELD_ID).and_then(|s| s.parse().ok()),
        name: fields
            .get(1)
            .map(|s| s.chars().take(MAX_NAME_LEN).collect()),
        utime: field(FIELD_UTIME).and_then(|s| s.parse().ok()),
        stime: field(FIELD_STIME).and_then(|s| s.parse().ok()),
        processor: field(FIELD_PROCESSOR).and_then(|s| s.parse().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASH_STAT: &str = "1234 (bash) S 1233 1234 1234 34816 1235 4194304 5000 50000 10 20 100 50 200 100 20 0 1 0 100000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0";

    #[test]
    fn test_parse_system_counters() {
        let content = "\
cpu  10000 500 3000 80000 1000 200 100 7 8 9
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
ctxt 500000
btime 1700000000
";
        let cpu = parse_system_counters(content).unwrap();

        assert_eq!(cpu.user, 10000);
        assert_eq!(cpu.nice, 500);
        assert_eq!(cpu.system, 3000);
        assert_eq!(cpu.idle, 80000);
        assert_eq!(cpu.iowait, 1000);
        assert_eq!(cpu.irq, 200);
        assert_eq!(cpu.softirq, 100);
        assert_eq!(cpu.steal, 7);
        assert_eq!(cpu.guest, 8);
        assert_eq!(cpu.guest_nice, 9);
    }

    #[test]
    fn test_parse_system_counters_short_line() {
        // 2.6-era kernels stop after softirq
        let cpu = parse_system_counters("cpu  10 20 30 40 50 60 70\n").unwrap();

        assert_eq!(cpu.user, 10);
        assert_eq!(cpu.softirq, 70);
        assert_eq!(cpu.steal, 0);
        assert_eq!(cpu.guest_nice, 0);
    }

    #[test]
    fn test_parse_system_counters_ignores_per_cpu_lines() {
        let content = "cpu0 1 2 3 4\ncpu  5 6 7 8\n";
        let cpu = parse_system_counters(content).unwrap();
        assert_eq!(cpu.user, 5);
    }

    #[test]
    fn test_parse_system_counters_missing_aggregate() {
        let err = parse_system_counters("cpu0 1 2 3 4\nctxt 5\n").unwrap_err();
        assert!(err.message.contains("cpu"));
        assert!(parse_system_counters("").is_err());
    }

    #[test]
    fn test_tokenize_task_stat_basic() {
        let fields = tokenize_task_stat(BASH_STAT);

        assert!(fields.is_complete());
        assert_eq!(fields.id, Some(1234));
        assert_eq!(fields.name.as_deref(), Some("bash"));
        assert_eq!(fields.utime, Some(100));
        assert_eq!(fields.stime, Some(50));
        assert_eq!(fields.processor, Some(2));
    }

    #[test]
    fn test_tokenize_task_stat_with_spaces_in_comm() {
        let content = "5000 (Web Content) S 4999 5000 4999 0 -1 4194304 100000 0 500 0 5000 1000 0 0 20 0 20 0 500000 2000000000 50000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 3 0 0 0 0 0 0 0 0 0 0 0 0 0";
        let fields = tokenize_task_stat(content);

        assert_eq!(fields.id, Some(5000));
        assert_eq!(fields.name.as_deref(), Some("Web Content"));
        assert_eq!(fields.utime, Some(5000));
        assert_eq!(fields.stime, Some(1000));
        assert_eq!(fields.processor, Some(3));
    }

    #[test]
    fn test_tokenize_task_stat_with_parentheses_in_comm() {
        let content = "5001 (test) 1)) S 1 5001 5001 0 -1 4194304 1000 0 0 0 10 5 0 0 20 0 1 0 500100 10000000 1000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0";
        let fields = tokenize_task_stat(content);

        assert_eq!(fields.name.as_deref(), Some("test) 1)"));
        assert_eq!(fields.utime, Some(10));
        assert_eq!(fields.stime, Some(5));
        assert_eq!(fields.processor, Some(1));
    }

    #[test]
    fn test_tokenize_task_stat_without_parentheses() {
        let fields = tokenize_task_stat(&BASH_STAT.replace("(bash)", "bash"));

        assert_eq!(fields.name.as_deref(), Some("bash"));
        assert_eq!(fields.utime, Some(100));
        assert_eq!(fields.processor, Some(2));
    }

    #[test]
    fn test_tokenize_task_stat_short_record() {
        let fields = tokenize_task_stat("77 (short) R 1 77 77 0 -1 0 0 0 0 0 12 3");

        assert_eq!(fields.id, Some(77));
        assert_eq!(fields.name.as_deref(), Some("short"));
        assert_eq!(fields.utime, Some(12));
        assert_eq!(fields.stime, Some(3));
        assert_eq!(fields.processor, None);
        assert_eq!(fields.missing(), vec!["processor"]);

        let counters = fields.into_counters();
        assert_eq!(counters.processor, 0);
        assert_eq!(counters.utime, 12);
    }

    #[test]
    fn test_tokenize_task_stat_garbage() {
        let fields = tokenize_task_stat("not a stat record");
        assert_eq!(fields.id, None);
        assert_eq!(fields.name.as_deref(), Some("a"));
        assert_eq!(fields.utime, None);

        let fields = tokenize_task_stat("");
        assert_eq!(fields, TaskStatFields::default());
        assert!(fields.into_counters().is_empty());
    }

    #[test]
    fn test_tokenize_task_stat_truncates_name() {
        let long_name = "x".repeat(MAX_NAME_LEN + 40);
        let content = BASH_STAT.replace("bash", &long_name);
        let fields = tokenize_task_stat(&content);

        assert_eq!(fields.name.map(|n| n.len()), Some(MAX_NAME_LEN));
        assert_eq!(fields.utime, Some(100));
    }

    #[test]
    fn test_tokenize_task_stat_non_numeric_field() {
        let content = BASH_STAT.replacen(" 100 50 ", " abc 50 ", 1);
        let fields = tokenize_task_stat(&content);

        assert_eq!(fields.utime, None);
        assert_eq!(fields.stime, Some(50));
        assert_eq!(fields.missing(), vec!["utime"]);
    }
}
