//! Stream configuration.
//!
//! Loaded once at startup and fixed for the lifetime of a [`PostStream`].
//!
//! [`PostStream`]: crate::PostStream

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Site default for the time-gap threshold, in days.
pub const DEFAULT_SHOW_TIME_GAP_DAYS: u32 = 7;

/// Quiet period before a cloak-triggered rerender fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Recognized stream options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
	/// Whether off-screen posts may be cloaked.
	pub cloaking_enabled: bool,
	/// Testing mode. Cloaking never engages while set.
	pub testing: bool,
	/// Consecutive posts further apart than this many whole days get a time-gap marker.
	pub show_time_gap_days: u32,
	/// Debounce window for cloak-triggered rerenders.
	pub debounce_ms: u64,
}

impl Default for StreamConfig {
	fn default() -> Self {
		Self {
			cloaking_enabled: true,
			testing: false,
			show_time_gap_days: DEFAULT_SHOW_TIME_GAP_DAYS,
			debounce_ms: DEFAULT_DEBOUNCE_MS,
		}
	}
}

impl StreamConfig {
	/// Configuration for test runs: cloaking is off.
	pub fn testing() -> Self {
		Self {
			testing: true,
			..Self::default()
		}
	}

	/// Whether cloak/uncloak have any effect.
	pub const fn cloaking_active(&self) -> bool {
		self.cloaking_enabled && !self.testing
	}

	pub const fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()
	}

	/// Reads and parses a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	fn validate(self) -> Result<Self, ConfigError> {
		if self.debounce_ms == 0 {
			return Err(ConfigError::Invalid {
				key: "debounce_ms",
				reason: "must be greater than zero".into(),
			});
		}
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn empty_document_yields_defaults() {
		let config = StreamConfig::from_toml_str("").expect("parse");
		assert_eq!(config, StreamConfig::default());
		assert!(config.cloaking_active());
		assert_eq!(config.debounce(), Duration::from_millis(1000));
	}

	#[test]
	fn testing_mode_forces_cloaking_off() {
		let config = StreamConfig::from_toml_str("cloaking_enabled = true\ntesting = true\n").expect("parse");
		assert!(!config.cloaking_active());
		assert!(!StreamConfig::testing().cloaking_active());
	}

	#[test]
	fn parses_time_gap_threshold() {
		let config = StreamConfig::from_toml_str("show_time_gap_days = 3").expect("parse");
		assert_eq!(config.show_time_gap_days, 3);
	}

	#[test]
	fn rejects_unknown_keys() {
		let err = StreamConfig::from_toml_str("cloak = false").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[test]
	fn rejects_zero_debounce() {
		let err = StreamConfig::from_toml_str("debounce_ms = 0").unwrap_err();
		assert!(matches!(err, ConfigError::Invalid { key: "debounce_ms", .. }));
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().expect("temp file");
		writeln!(file, "show_time_gap_days = 2").expect("write config");

		let config = StreamConfig::load(file.path()).expect("load");
		assert_eq!(config.show_time_gap_days, 2);
	}

	#[test]
	fn load_reports_missing_file() {
		let dir = tempfile::tempdir().expect("temp dir");
		let path = dir.path().join("absent.toml");
		let err = StreamConfig::load(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
	}
}
