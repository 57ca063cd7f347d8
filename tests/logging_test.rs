//! Checks what swallowed failures emit through the `log` facade.
//!
//! Kept in its own test binary: the logger is process-global, and no other
//! test here may run concurrently and add records of its own.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use windex::indexer;

// ---------------------------------------------------------------------------
// Capturing logger
// ---------------------------------------------------------------------------

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

fn warnings() -> Vec<String> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, msg)| msg.clone())
        .collect()
}

fn clear() {
    RECORDS.lock().unwrap().clear();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn verbose_flag_controls_failure_warnings() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    // Verbose: exactly one warning naming the operation and the path.
    let loud = indexer().verbose(true).build().unwrap();
    clear();
    loud.index_file(&missing);

    let warned = warnings();
    assert_eq!(warned.len(), 1, "got {warned:?}");
    assert!(warned[0].contains("index file"), "got {:?}", warned[0]);
    assert!(warned[0].contains(&missing.display().to_string()), "got {:?}", warned[0]);

    // Quiet: the same failure is swallowed without a trace at WARN.
    let quiet = indexer().verbose(false).build().unwrap();
    clear();
    let report = quiet.index_file(&missing);

    assert!(warnings().is_empty(), "got {:?}", warnings());
    assert_eq!(report.tasks, 1);
}
