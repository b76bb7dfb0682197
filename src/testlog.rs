//! Capture log records in tests.
//!
//! Records are kept per thread, so tests running in parallel only see their own.
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};

struct Capture(Mutex<Vec<(ThreadId, Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.0.lock().unwrap().push((
            thread::current().id(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
static INIT: Once = Once::new();

/// Run `f` and return the records it logged on this thread.
pub fn captured<F: FnOnce()>(f: F) -> Vec<(Level, String)> {
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });

    let id = thread::current().id();
    CAPTURE.0.lock().unwrap().retain(|(t, _, _)| *t != id);

    f();

    let mut records = CAPTURE.0.lock().unwrap();
    let (mine, others): (Vec<_>, Vec<_>) = records.drain(..).partition(|(t, _, _)| *t == id);
    *records = others;

    mine.into_iter().map(|(_, l, m)| (l, m)).collect()
}

pub fn warnings(records: &[(Level, String)]) -> usize {
    records.iter().filter(|(l, _)| *l == Level::Warn).count()
}

/// Lines made only of `-`, logged after every processed item.
pub fn separators(records: &[(Level, String)]) -> usize {
    records
        .iter()
        .filter(|(_, m)| !m.is_empty() && m.chars().all(|c| c == '-'))
        .count()
}
