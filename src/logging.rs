#![cfg(feature = "std")]

use std::env;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level (`off`, `error` ... `trace`).
pub const LOG_ENV: &str = "BROADSIDE_LOG";

/// Writes `LEVEL target: message` lines to stderr, keeping stdout free for
/// boards and JSON.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(std::io::stderr().lock(), "{}", format_record(record));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// One log line, without the trailing newline. Targets inside this crate
/// lose their `broadside::` prefix.
pub fn format_record(record: &Record) -> String {
    let target = record.target().strip_prefix("broadside::").unwrap_or(record.target());
    format!("{:<5} {}: {}", record.level(), target, record.args())
}

/// Level named by `value`, or `Info` when absent or unparsable.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger at the level given by `BROADSIDE_LOG`.
///
/// Calling it again only adjusts the level.
pub fn init_logging() -> LevelFilter {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
    level
}
