//! Shared helpers for unit tests.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, OnceLock};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn logger() -> &'static CapturingLogger {
    static LOGGER: OnceLock<CapturingLogger> = OnceLock::new();
    let logger = LOGGER.get_or_init(|| CapturingLogger {
        records: Mutex::new(Vec::new()),
    });
    // Only the first call in the test binary wins; later calls are no-ops.
    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    logger
}

/// Install the capturing logger. Call at the top of any test that inspects logs.
pub fn capture_logs() {
    logger();
}

/// Every captured message at `level` that contains `needle`.
///
/// Tests run in parallel and share the logger, so callers should look for
/// text unique to their own test.
pub fn logged(level: Level, needle: &str) -> Vec<String> {
    logger()
        .records
        .lock()
        .map(|records| {
            records
                .iter()
                .filter(|(l, msg)| *l == level && msg.contains(needle))
                .map(|(_, msg)| msg.clone())
                .collect()
        })
        .unwrap_or_default()
}
