// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recurring weekly maintenance windows.
//!
//! A window is a civil-time range (`start <= minute-of-day < end`) on a set of
//! weekdays in an IANA timezone. Comparisons happen on the local wall clock,
//! so daylight saving transitions are left to `chrono-tz`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

/// Errors raised while validating maintenance window definitions.
#[derive(Debug, Error, PartialEq)]
pub enum WindowError {
	#[error("at least one maintenance window must be defined when enabled")]
	NoWindows,

	#[error("at least one day must be specified")]
	NoDays,

	#[error(
		"invalid day: '{0}', must be one of: sunday, monday, tuesday, wednesday, thursday, friday, saturday"
	)]
	InvalidDay(String),

	#[error("invalid {which}: {reason}")]
	InvalidTime { which: &'static str, reason: String },

	#[error("endTime ({end}) must be after startTime ({start})")]
	EndNotAfterStart { start: String, end: String },

	#[error("timezone must be specified")]
	MissingTimezone,

	#[error("invalid timezone '{name}': {reason}")]
	InvalidTimezone { name: String, reason: String },

	#[error("{label}: {source}")]
	Window {
		label: String,
		#[source]
		source: Box<WindowError>,
	},
}

impl WindowError {
	/// Attach the window's name, or its index when unnamed.
	pub fn for_window(self, name: Option<&str>, index: usize) -> Self {
		let label = match name {
			Some(name) if !name.is_empty() => format!("window '{name}'"),
			_ => format!("window[{index}]"),
		};
		WindowError::Window {
			label,
			source: Box::new(self),
		}
	}
}

/// Parse an English weekday name, ignoring case and surrounding whitespace.
pub fn parse_day(day: &str) -> Result<Weekday, WindowError> {
	match day.trim().to_ascii_lowercase().as_str() {
		"sunday" => Ok(Weekday::Sun),
		"monday" => Ok(Weekday::Mon),
		"tuesday" => Ok(Weekday::Tue),
		"wednesday" => Ok(Weekday::Wed),
		"thursday" => Ok(Weekday::Thu),
		"friday" => Ok(Weekday::Fri),
		"saturday" => Ok(Weekday::Sat),
		_ => Err(WindowError::InvalidDay(day.to_string())),
	}
}

/// Parse `HH:MM` into `(hour, minute)`.
pub fn parse_time(value: &str) -> Result<(u32, u32), WindowError> {
	let invalid = |reason: String| WindowError::InvalidTime {
		which: "time",
		reason,
	};

	if value.is_empty() {
		return Err(invalid("time cannot be empty".to_string()));
	}

	let parts: Vec<&str> = value.split(':').collect();
	let [hour, minute] = parts.as_slice() else {
		return Err(invalid(format!(
			"invalid time format '{value}', expected HH:MM"
		)));
	};

	let hour: i64 = hour
		.trim()
		.parse()
		.map_err(|_| invalid(format!("invalid hour in '{value}'")))?;
	let minute: i64 = minute
		.trim()
		.parse()
		.map_err(|_| invalid(format!("invalid minute in '{value}'")))?;

	if !(0..=23).contains(&hour) {
		return Err(invalid(format!("hour must be between 0 and 23, got {hour}")));
	}
	if !(0..=59).contains(&minute) {
		return Err(invalid(format!(
			"minute must be between 0 and 59, got {minute}"
		)));
	}

	Ok((hour as u32, minute as u32))
}

fn minute_of_day<T: Timelike>(t: &T) -> u32 {
	t.hour() * 60 + t.minute()
}

/// One validated, immutable weekly window.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceWindow {
	name: Option<String>,
	days: Vec<Weekday>,
	start_minute: u32,
	end_minute: u32,
	timezone: Tz,
}

impl MaintenanceWindow {
	pub fn new<S: AsRef<str>>(
		name: Option<String>,
		days: &[S],
		start_time: &str,
		end_time: &str,
		timezone: &str,
	) -> Result<Self, WindowError> {
		if days.is_empty() {
			return Err(WindowError::NoDays);
		}
		let mut parsed_days = Vec::with_capacity(days.len());
		for day in days {
			let day = parse_day(day.as_ref())?;
			if !parsed_days.contains(&day) {
				parsed_days.push(day);
			}
		}

		let (start_hour, start_min) = parse_time(start_time).map_err(|e| e.rename("startTime"))?;
		let (end_hour, end_min) = parse_time(end_time).map_err(|e| e.rename("endTime"))?;
		let start_minute = start_hour * 60 + start_min;
		let end_minute = end_hour * 60 + end_min;
		if end_minute <= start_minute {
			return Err(WindowError::EndNotAfterStart {
				start: start_time.to_string(),
				end: end_time.to_string(),
			});
		}

		if timezone.trim().is_empty() {
			return Err(WindowError::MissingTimezone);
		}
		let timezone: Tz = timezone
			.trim()
			.parse::<Tz>()
			.map_err(|e| WindowError::InvalidTimezone {
				name: timezone.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Self {
			name: name.filter(|n| !n.is_empty()),
			days: parsed_days,
			start_minute,
			end_minute,
			timezone,
		})
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn days(&self) -> &[Weekday] {
		&self.days
	}

	pub fn timezone(&self) -> Tz {
		self.timezone
	}

	/// Start as minute of day in the window's timezone.
	pub fn start_minute(&self) -> u32 {
		self.start_minute
	}

	pub fn end_minute(&self) -> u32 {
		self.end_minute
	}

	/// Start inclusive, end exclusive.
	pub fn is_in_window(&self, t: DateTime<Utc>) -> bool {
		let local = t.with_timezone(&self.timezone);
		if !self.days.contains(&local.weekday()) {
			return false;
		}
		let minute = minute_of_day(&local);
		minute >= self.start_minute && minute < self.end_minute
	}

	/// Start of the next opening at or around `t`.
	///
	/// While `t` is inside the window this is the start of the current
	/// opening, which lies in the past: there is nothing to wait for.
	pub fn next_start(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
		if self.days.is_empty() {
			return None;
		}

		let local = t.with_timezone(&self.timezone);
		let today = local.date_naive();
		if self.days.contains(&local.weekday()) && minute_of_day(&local) < self.end_minute {
			let (earliest, latest) = self.starts_on(today);
			let candidates = [earliest, latest];
			let found = if self.is_in_window(t) {
				candidates.into_iter().flatten().filter(|s| *s <= t).max().or(earliest)
			} else {
				// On a fall-back day the first pass of a repeated start may be behind `t`.
				candidates.into_iter().flatten().find(|s| *s >= t)
			};
			if found.is_some() {
				return found;
			}
		}

		(1..=7u64)
			.filter_map(|ahead| today.checked_add_days(Days::new(ahead)))
			.find(|date| self.days.contains(&date.weekday()))
			.and_then(|date| self.starts_on(date).0)
	}

	/// Earliest and latest instant of the local start on `date`. They differ
	/// only when the wall clock passes the start twice.
	fn starts_on(&self, date: NaiveDate) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
		let Some(naive) = date.and_hms_opt(self.start_minute / 60, self.start_minute % 60, 0) else {
			return (None, None);
		};
		let mut local = self.timezone.from_local_datetime(&naive);
		if local.earliest().is_none() {
			// Start falls into a DST gap: the wall clock skips it, open an hour later.
			local = self
				.timezone
				.from_local_datetime(&(naive + chrono::Duration::hours(1)));
		}
		(
			local.earliest().map(|dt| dt.with_timezone(&Utc)),
			local.latest().map(|dt| dt.with_timezone(&Utc)),
		)
	}
}

impl fmt::Display for MaintenanceWindow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let days: Vec<String> = self.days.iter().map(|d| d.to_string()).collect();
		write!(
			f,
			"{} {:02}:{:02}-{:02}:{:02} {}",
			days.join(","),
			self.start_minute / 60,
			self.start_minute % 60,
			self.end_minute / 60,
			self.end_minute % 60,
			self.timezone.name()
		)?;
		if let Some(name) = &self.name {
			write!(f, " ({name})")?;
		}
		Ok(())
	}
}

impl WindowError {
	fn rename(self, which: &'static str) -> Self {
		match self {
			WindowError::InvalidTime { reason, .. } => WindowError::InvalidTime { which, reason },
			other => other,
		}
	}
}

/// The process-wide window gate.
///
/// Disabled means the gate always admits rotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceWindows {
	enabled: bool,
	windows: Vec<MaintenanceWindow>,
}

impl MaintenanceWindows {
	pub fn new(enabled: bool, windows: Vec<MaintenanceWindow>) -> Result<Self, WindowError> {
		if enabled && windows.is_empty() {
			return Err(WindowError::NoWindows);
		}
		Ok(Self { enabled, windows })
	}

	pub fn disabled() -> Self {
		Self::default()
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn windows(&self) -> &[MaintenanceWindow] {
		&self.windows
	}

	pub fn is_in_any_window(&self, t: DateTime<Utc>) -> bool {
		if !self.enabled {
			return true;
		}
		self.windows.iter().any(|w| w.is_in_window(t))
	}

	/// First window in list order containing `t`.
	pub fn active_window(&self, t: DateTime<Utc>) -> Option<&MaintenanceWindow> {
		if !self.enabled {
			return None;
		}
		self.windows.iter().find(|w| w.is_in_window(t))
	}

	/// Earliest [`MaintenanceWindow::next_start`] across all windows.
	pub fn next_window_start(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
		if !self.enabled {
			return None;
		}
		self.windows.iter().filter_map(|w| w.next_start(t)).min()
	}

	/// Zero when disabled or already inside a window.
	pub fn duration_until_next_window(&self, t: DateTime<Utc>) -> Duration {
		if !self.enabled || self.is_in_any_window(t) {
			return Duration::ZERO;
		}
		self
			.next_window_start(t)
			.and_then(|next| (next - t).to_std().ok())
			.unwrap_or(Duration::ZERO)
	}
}
