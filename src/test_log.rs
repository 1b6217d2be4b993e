//! Capturing logger for unit tests.
//!
//! Records are counted per thread, so each test only sees its own
//! diagnostics even when the harness runs tests in parallel.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Install the logger (once per process) and clear this thread's records.
pub(crate) fn capture() {
    INIT.call_once(|| {
        // Another logger may already be installed by a different harness.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

/// Messages logged at `level` on this thread since the last [`capture`].
pub(crate) fn messages(level: Level) -> Vec<String> {
    RECORDS.with(|r| {
        r.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    })
}

/// Number of warnings logged on this thread since the last [`capture`].
pub(crate) fn warnings() -> usize {
    messages(Level::Warn).len()
}
