//! Shared formatting helpers for report lines.

/// Format a percentage with two decimals and a `%` suffix: `"40.00%"`.
///
/// Non-finite values are printed as Rust renders them (`"NaN%"`, `"inf%"`).
pub fn format_percent(pct: f64) -> String {
    format!("{:3.2}%", pct)
}
