//! Unit tests for the logging system
//!
//! Tests swap in a capturing logger, so they serialize on the global
//! logger state via `serial_test`.

use std::sync::{Arc, Mutex};

use serial_test::serial;

use crate::log::{log, reset_logger, set_logger, LogEntry, Logger, LogSeverity};

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn install() -> Arc<Mutex<Vec<LogEntry>>> {
        let entries = Arc::new(Mutex::new(Vec::new()));
        set_logger(CaptureLogger { entries: entries.clone() });
        entries
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

#[test]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
#[serial]
fn test_set_logger_routes_entries() {
    let entries = CaptureLogger::install();

    log(LogSeverity::Info, "helios::render", "renderer created".to_string());
    reset_logger();

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].source, "helios::render");
    assert_eq!(entries[0].message, "renderer created");
    assert!(entries[0].file.is_none());
    assert!(entries[0].line.is_none());
}

#[test]
#[serial]
fn test_macros_carry_severity_and_formatting() {
    let entries = CaptureLogger::install();

    render_trace!("helios::render", "begin frame {}", 7);
    render_debug!("helios::render", "pass has {} layers", 3);
    render_info!("helios::render", "display resized");
    render_warn!("helios::render", "shader has no uniform '{}'", "color");
    reset_logger();

    let entries = entries.lock().unwrap();
    let severities: Vec<LogSeverity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
        ]
    );
    assert_eq!(entries[0].message, "begin frame 7");
    assert_eq!(entries[3].message, "shader has no uniform 'color'");
}

#[test]
#[serial]
fn test_error_macro_captures_file_and_line() {
    let entries = CaptureLogger::install();

    render_error!("helios::gl", "compile failed");
    reset_logger();

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert_eq!(entries[0].file, Some(file!()));
    assert!(entries[0].line.is_some());
}

#[test]
#[serial]
fn test_reset_logger_restores_default() {
    let entries = CaptureLogger::install();
    reset_logger();

    // After reset, entries no longer reach the capture logger.
    log(LogSeverity::Info, "helios::render", "dropped".to_string());
    assert!(entries.lock().unwrap().is_empty());
}
