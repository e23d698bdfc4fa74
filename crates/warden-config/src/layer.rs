// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The partial configuration every source produces.

use serde::Deserialize;

use crate::sections::{DefaultsConfigLayer, LoggingConfigLayer, RotationConfigLayer};

/// One source's view of the configuration. Sections it does not mention
/// stay `None` and leave lower-precedence values alone.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WardenConfigLayer {
	#[serde(default)]
	pub defaults: Option<DefaultsConfigLayer>,
	#[serde(default)]
	pub rotation: Option<RotationConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl WardenConfigLayer {
	/// Overlay `other` on top of `self`.
	pub fn merge(&mut self, other: WardenConfigLayer) {
		merge_section(&mut self.defaults, other.defaults, DefaultsConfigLayer::merge);
		merge_section(&mut self.rotation, other.rotation, RotationConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	let Some(other) = other else {
		return;
	};
	if let Some(existing) = base.as_mut() {
		merge(existing, other);
	} else {
		*base = Some(other);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_keeps_sections_missing_from_overlay() {
		let mut base = WardenConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("debug".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(WardenConfigLayer {
			defaults: Some(DefaultsConfigLayer {
				length: Some(64),
				..Default::default()
			}),
			..Default::default()
		});

		assert_eq!(
			base.logging.unwrap().level.as_deref(),
			Some("debug")
		);
		assert_eq!(base.defaults.unwrap().length, Some(64));
	}

	#[test]
	fn merge_overlays_fields_within_a_section() {
		let mut base = WardenConfigLayer {
			rotation: Some(RotationConfigLayer {
				min_interval: Some("10m".to_string()),
				create_events: Some(true),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(WardenConfigLayer {
			rotation: Some(RotationConfigLayer {
				min_interval: Some("1h".to_string()),
				..Default::default()
			}),
			..Default::default()
		});

		let rotation = base.rotation.unwrap();
		assert_eq!(rotation.min_interval.as_deref(), Some("1h"));
		assert_eq!(rotation.create_events, Some(true));
	}

	#[test]
	fn unknown_sections_are_rejected() {
		assert!(toml::from_str::<WardenConfigLayer>("[server]\nport = 1").is_err());
	}
}
