// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rotation interval parsing.
//!
//! Intervals use humantime's grammar, which already knows the `d` (24h) unit
//! alongside `s`, `m` and `h`: `90m`, `36h`, `7d`, `1d 12h`. Only the short
//! units `ns`, `us`, `µs`, `ms`, `s`, `m`, `h` and `d` are accepted; humantime's
//! weeks, months and years are rejected so `1M` never means a month.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid duration '{value}': {message}")]
pub struct DurationError {
	pub value: String,
	pub message: String,
}

const UNITS: &[&str] = &["ns", "us", "µs", "ms", "s", "m", "h", "d"];

pub fn parse_duration(value: &str) -> Result<Duration, DurationError> {
	let trimmed = value.trim();
	let unsupported = trimmed
		.split(|c: char| c.is_ascii_digit() || c.is_whitespace())
		.find(|unit| !unit.is_empty() && !UNITS.contains(unit));
	if let Some(unit) = unsupported {
		return Err(DurationError {
			value: value.to_string(),
			message: format!("unknown unit '{unit}', expected one of: {}", UNITS.join(", ")),
		});
	}

	humantime::parse_duration(trimmed).map_err(|e| DurationError {
		value: value.to_string(),
		message: e.to_string(),
	})
}

/// Human readable rendering for logs and event messages.
pub fn format_duration(duration: Duration) -> String {
	humantime::format_duration(duration).to_string()
}
