//! Process wide logger for unit tests that assert on what gets logged.
//!
//! Tests run in parallel, so filter records by something unique to the test.

use std::sync::{Mutex, Once};

static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
	fn enabled(&self, _metadata: &log::Metadata) -> bool {
		true
	}

	fn log(&self, record: &log::Record) {
		RECORDS
			.lock()
			.unwrap()
			.push((record.level(), record.args().to_string()));
	}

	fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

pub(crate) fn init() {
	static INIT: Once = Once::new();
	INIT.call_once(|| {
		log::set_logger(&LOGGER).unwrap();
		log::set_max_level(log::LevelFilter::Trace);
	});
}

pub(crate) fn records_containing(needle: &str) -> Vec<(log::Level, String)> {
	RECORDS
		.lock()
		.unwrap()
		.iter()
		.filter(|(_, line)| line.contains(needle))
		.cloned()
		.collect()
}
