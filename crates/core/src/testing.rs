//! Test helpers for crates built on `atlas_core`.
//!
//! [`LogCapture`] records `log` output emitted on the current thread, so tests
//! running in parallel never see each other's records. `#[tokio::test]` uses
//! a current-thread runtime, which keeps async tests on the test thread too.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// One captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static CAPTURED: RefCell<Option<Vec<CapturedLog>>> = const { RefCell::new(None) };
}

struct ThreadLogger;

impl Log for ThreadLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let entry = CapturedLog {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push(entry);
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;
static INSTALL: Once = Once::new();

/// Captures log records of the current thread until dropped.
pub struct LogCapture {
    _private: (),
}

impl LogCapture {
    pub fn start() -> Self {
        INSTALL.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Trace);
            }
        });
        CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
        Self { _private: () }
    }

    /// Records captured so far, in emission order.
    pub fn records(&self) -> Vec<CapturedLog> {
        CAPTURED.with(|captured| captured.borrow().clone().unwrap_or_default())
    }

    /// Records at `level` whose message contains `needle`.
    pub fn matching(&self, level: Level, needle: &str) -> Vec<CapturedLog> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level && r.message.contains(needle))
            .collect()
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        CAPTURED.with(|captured| *captured.borrow_mut() = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{report_error, ErrorParams};

    #[test]
    fn test_captures_current_thread_only() {
        let capture = LogCapture::start();
        log::warn!("on the test thread");
        std::thread::spawn(|| log::warn!("on another thread"))
            .join()
            .unwrap();

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[0].message, "on the test thread");
    }

    #[test]
    fn test_report_error_carries_params() {
        let capture = LogCapture::start();
        let mut params = ErrorParams::new();
        params.insert("platform", "cosmos".to_string());

        report_error("inflation is not a decimal", &params);

        let records = capture.matching(Level::Error, "platform=cosmos");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, "atlas::report");
    }
}
