use log::{Level, Log, Metadata, Record};
use wasm_bindgen::JsValue;

pub use crate::Config;

struct ConsoleLogger(Config);

impl Log for ConsoleLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= self.0.level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		let line = JsValue::from_str(&self.0.format(record));
		match record.level() {
			Level::Error => web_sys::console::error_1(&line),
			Level::Warn => web_sys::console::warn_1(&line),
			Level::Info => web_sys::console::info_1(&line),
			Level::Debug => web_sys::console::debug_1(&line),
			Level::Trace => web_sys::console::log_1(&line),
		}
	}

	fn flush(&self) {}
}

/// Routes the `log` facade to the browser console.
pub fn init(config: Config) {
	if log::set_boxed_logger(Box::new(ConsoleLogger(config))).is_ok() {
		log::set_max_level(config.level());
	}
}
