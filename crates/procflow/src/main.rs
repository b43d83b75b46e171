//! procflow - per-thread CPU utilization monitor.
//!
//! Samples `/proc` twice per cycle for one process and prints system, process
//! and per-thread CPU percentages until interrupted.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

#[cfg(target_os = "linux")]
use procflow_core::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use procflow_core::collector::mock::MockFs;
use procflow_core::collector::{MAX_THREADS, Sampler};
use procflow_core::monitor::{Monitor, SAMPLE_INTERVAL};

/// Per-thread CPU utilization monitor.
#[derive(Parser, Debug)]
#[command(name = "procflow", about = "Per-thread CPU utilization monitor", version)]
struct Args {
    /// Process to monitor. Parsed like C atoi: non-numeric input becomes 0.
    #[arg(value_name = "PID", value_parser = parse_pid, allow_negative_numbers = true)]
    pid: u32,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc", hide = true)]
    proc_path: String,
}

/// Converts a PID argument the way C `atoi` would.
///
/// Leading whitespace and a `+` sign are skipped, then the leading decimal
/// digits are taken. No digits, a `-` sign or an out-of-range value give 0.
fn parse_pid(s: &str) -> Result<u32, String> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    Ok(s[..end].parse().unwrap_or(0))
}

/// Parses the command line; usage errors exit with status 1.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        // --help and --version
        Err(e) => e.exit(),
    }
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
///
/// Diagnostics go to stdout, interleaved with the report lines.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for krate in ["procflow", "procflow_core"] {
        if let Ok(directive) = format!("{}={}", krate, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let ansi = std::io::stdout().is_terminal();
    if let Err(e) =
        tracing::subscriber::set_global_default(log_subscriber(filter, ansi, std::io::stdout))
    {
        eprintln!("Failed to install logger: {}", e);
    }
}

/// The fmt subscriber used for diagnostics. `ansi` is off when the output is
/// not a terminal, so piped report streams carry no escape codes.
fn log_subscriber<W>(
    filter: EnvFilter,
    ansi: bool,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}

/// Ctrl-C / SIGTERM handler: clears `running`, then logs.
///
/// The log line goes to stdout, which the main thread may be writing to, so
/// the flag must be cleared first.
fn shutdown_handler(running: Arc<AtomicBool>) -> impl Fn() + Send + 'static {
    move || {
        running.store(false, Ordering::SeqCst);
        info!("Received shutdown signal");
    }
}

fn main() {
    let args = parse_args();

    init_logging(args.verbose, args.quiet);

    info!("procflow {} starting", env!("CARGO_PKG_VERSION"));
    debug!(
        "Config: pid={}, interval={}ms, max_threads={}, proc={}",
        args.pid,
        SAMPLE_INTERVAL.as_millis(),
        MAX_THREADS,
        args.proc_path
    );

    #[cfg(target_os = "linux")]
    let sampler = Sampler::new(RealFs::new(), &args.proc_path, args.pid);
    #[cfg(not(target_os = "linux"))]
    let sampler = {
        warn!("not running on Linux, sampling an empty mock /proc");
        Sampler::new(MockFs::new(), &args.proc_path, args.pid)
    };

    let monitor = Monitor::new(sampler);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));

    if let Err(e) = ctrlc::set_handler(shutdown_handler(running.clone())) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    // Unlocked handle: stdout is locked per write, so log events from the
    // signal thread can interleave with report lines.
    match monitor.run(&running, &mut std::io::stdout()) {
        Ok(cycles) => info!("Shutdown complete after {} cycles", cycles),
        Err(e) => {
            error!("Failed to write report: {}", e);
            std::process::exit(1);
        }
    }
}
