use log::{LevelFilter, Record};

pub mod wasm;

#[derive(Debug, Clone, Copy)]
pub struct Config {
	level: LevelFilter,
	prefer_target: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			level: if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info },
			prefer_target: false,
		}
	}
}

impl Config {
	/// Label records with their `target:` instead of the module path.
	pub fn prefer_target(mut self) -> Self {
		self.prefer_target = true;
		self
	}

	pub fn with_level(mut self, level: LevelFilter) -> Self {
		self.level = level;
		self
	}

	pub fn level(&self) -> LevelFilter {
		self.level
	}

	/// Renders a record as a single console line, e.g. `[WARN] auth: Session refresh failed`.
	pub fn format(&self, record: &Record) -> String {
		let origin = match (self.prefer_target, record.module_path()) {
			(false, Some(path)) => path,
			_ => record.target(),
		};
		format!("[{}] {origin}: {}", record.level(), record.args())
	}
}
