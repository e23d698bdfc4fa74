// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rotation policy and maintenance windows.
//!
//! ```toml
//! [rotation]
//! min_interval = "5m"
//! create_events = true
//!
//! [rotation.maintenance_windows]
//! enabled = true
//!
//! [[rotation.maintenance_windows.windows]]
//! name = "weekend"
//! days = ["saturday", "sunday"]
//! start_time = "03:00"
//! end_time = "05:00"
//! timezone = "Europe/Berlin"
//! ```

use serde::Deserialize;
use warden_core::{parse_duration, MaintenanceWindow, MaintenanceWindows, RotationPolicy, WindowError};

use crate::error::ConfigError;

const DEFAULT_MIN_INTERVAL: &str = "5m";

/// One window as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceWindowConfig {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub days: Vec<String>,
	#[serde(default)]
	pub start_time: String,
	#[serde(default)]
	pub end_time: String,
	#[serde(default)]
	pub timezone: String,
}

impl MaintenanceWindowConfig {
	pub fn build(&self) -> Result<MaintenanceWindow, WindowError> {
		MaintenanceWindow::new(
			self.name.clone(),
			self.days.as_slice(),
			&self.start_time,
			&self.end_time,
			&self.timezone,
		)
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceWindowsConfig {
	pub enabled: bool,
	pub windows: Vec<MaintenanceWindowConfig>,
}

impl MaintenanceWindowsConfig {
	/// Validate every window. Window definitions are ignored while disabled.
	pub fn build(&self) -> Result<MaintenanceWindows, WindowError> {
		if !self.enabled {
			return Ok(MaintenanceWindows::disabled());
		}
		let windows = self
			.windows
			.iter()
			.enumerate()
			.map(|(i, w)| w.build().map_err(|e| e.for_window(w.name.as_deref(), i)))
			.collect::<Result<Vec<_>, _>>()?;
		MaintenanceWindows::new(true, windows)
	}
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceWindowsConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub windows: Option<Vec<MaintenanceWindowConfig>>,
}

impl MaintenanceWindowsConfigLayer {
	pub fn merge(&mut self, other: MaintenanceWindowsConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.windows.is_some() {
			self.windows = other.windows;
		}
	}

	pub fn finalize(self) -> MaintenanceWindowsConfig {
		MaintenanceWindowsConfig {
			enabled: self.enabled.unwrap_or(false),
			windows: self.windows.unwrap_or_default(),
		}
	}
}

/// Rotation configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct RotationConfig {
	pub min_interval: String,
	pub create_events: bool,
	pub maintenance_windows: MaintenanceWindowsConfig,
}

impl Default for RotationConfig {
	fn default() -> Self {
		RotationConfigLayer::default().finalize()
	}
}

impl RotationConfig {
	pub fn policy(&self) -> Result<RotationPolicy, ConfigError> {
		let min_interval =
			parse_duration(&self.min_interval).map_err(|e| ConfigError::InvalidValue {
				key: "rotation.min_interval".to_string(),
				message: e.to_string(),
			})?;
		Ok(RotationPolicy {
			min_interval,
			create_events: self.create_events,
		})
	}
}

/// Rotation configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RotationConfigLayer {
	#[serde(default)]
	pub min_interval: Option<String>,
	#[serde(default)]
	pub create_events: Option<bool>,
	#[serde(default)]
	pub maintenance_windows: Option<MaintenanceWindowsConfigLayer>,
}

impl RotationConfigLayer {
	pub fn merge(&mut self, other: RotationConfigLayer) {
		if other.min_interval.is_some() {
			self.min_interval = other.min_interval;
		}
		if other.create_events.is_some() {
			self.create_events = other.create_events;
		}
		match (&mut self.maintenance_windows, other.maintenance_windows) {
			(Some(base), Some(other)) => base.merge(other),
			(base, other @ Some(_)) => *base = other,
			(_, None) => {}
		}
	}

	pub fn finalize(self) -> RotationConfig {
		RotationConfig {
			min_interval: self
				.min_interval
				.unwrap_or_else(|| DEFAULT_MIN_INTERVAL.to_string()),
			create_events: self.create_events.unwrap_or(false),
			maintenance_windows: self.maintenance_windows.unwrap_or_default().finalize(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	fn window(name: Option<&str>, days: &[&str], start: &str, end: &str, tz: &str) -> MaintenanceWindowConfig {
		MaintenanceWindowConfig {
			name: name.map(str::to_string),
			days: days.iter().map(|d| d.to_string()).collect(),
			start_time: start.to_string(),
			end_time: end.to_string(),
			timezone: tz.to_string(),
		}
	}

	#[test]
	fn default_policy() {
		let policy = RotationConfig::default().policy().unwrap();
		assert_eq!(policy.min_interval, Duration::from_secs(300));
		assert!(!policy.create_events);
	}

	#[test]
	fn min_interval_accepts_days() {
		let config = RotationConfigLayer {
			min_interval: Some("1d".to_string()),
			..Default::default()
		}
		.finalize();
		assert_eq!(
			config.policy().unwrap().min_interval,
			Duration::from_secs(86400)
		);
	}

	#[test]
	fn invalid_min_interval_is_rejected() {
		let config = RotationConfigLayer {
			min_interval: Some("soon".to_string()),
			..Default::default()
		}
		.finalize();
		let err = config.policy().unwrap_err();
		assert!(err.to_string().contains("rotation.min_interval"));
	}

	#[test]
	fn disabled_windows_are_not_validated() {
		let config = MaintenanceWindowsConfig {
			enabled: false,
			windows: vec![window(None, &["someday"], "25:00", "05:00", "Nowhere")],
		};
		let windows = config.build().unwrap();
		assert!(!windows.is_enabled());
	}

	#[test]
	fn enabled_without_windows_fails() {
		let config = MaintenanceWindowsConfig {
			enabled: true,
			windows: vec![],
		};
		assert_eq!(config.build().unwrap_err(), WindowError::NoWindows);
	}

	#[test]
	fn errors_are_labelled_by_name_or_index() {
		let config = MaintenanceWindowsConfig {
			enabled: true,
			windows: vec![
				window(Some("weekend"), &["saturday"], "03:00", "05:00", "UTC"),
				window(None, &["monday"], "05:00", "03:00", "UTC"),
			],
		};
		assert_eq!(
			config.build().unwrap_err().to_string(),
			"window[1]: endTime (03:00) must be after startTime (05:00)"
		);

		let config = MaintenanceWindowsConfig {
			enabled: true,
			windows: vec![window(Some("nightly"), &["funday"], "03:00", "05:00", "UTC")],
		};
		assert!(config
			.build()
			.unwrap_err()
			.to_string()
			.starts_with("window 'nightly': invalid day: 'funday'"));
	}

	#[test]
	fn deserializes_window_tables() {
		let layer: RotationConfigLayer = toml::from_str(
			r#"
min_interval = "10m"

[maintenance_windows]
enabled = true

[[maintenance_windows.windows]]
name = "weekend"
days = ["saturday", "sunday"]
start_time = "03:00"
end_time = "05:00"
timezone = "Europe/Berlin"
"#,
		)
		.unwrap();
		let config = layer.finalize();
		let windows = config.maintenance_windows.build().unwrap();
		assert!(windows.is_enabled());
		assert_eq!(windows.windows()[0].name(), Some("weekend"));
		assert_eq!(windows.windows()[0].days().len(), 2);
	}

	#[test]
	fn merge_replaces_window_list() {
		let mut base = RotationConfigLayer {
			maintenance_windows: Some(MaintenanceWindowsConfigLayer {
				enabled: Some(true),
				windows: Some(vec![window(None, &["monday"], "01:00", "02:00", "UTC")]),
			}),
			..Default::default()
		};
		base.merge(RotationConfigLayer {
			maintenance_windows: Some(MaintenanceWindowsConfigLayer {
				enabled: Some(false),
				windows: None,
			}),
			..Default::default()
		});
		let config = base.finalize().maintenance_windows;
		assert!(!config.enabled);
		assert_eq!(config.windows.len(), 1);
	}
}
