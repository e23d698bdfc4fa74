// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-field rotation decisions.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::window::MaintenanceWindows;

/// Rotation policy applied to every field.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPolicy {
	/// Intervals shorter than this are refused.
	pub min_interval: Duration,
	/// Emit `RotationSucceeded` events.
	pub create_events: bool,
}

impl Default for RotationPolicy {
	fn default() -> Self {
		Self {
			min_interval: Duration::from_secs(5 * 60),
			create_events: false,
		}
	}
}

/// What the decision engine knows about one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldState {
	pub has_value: bool,
	pub interval: Option<Duration>,
	/// Time of the last write of this field.
	pub baseline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	/// No value yet.
	Generate,
	/// Due and admitted by the window gate.
	Rotate,
	/// Due, but the gate is closed for `wait`.
	Defer { wait: Duration },
	/// Nothing to do; `next_due` is how long until rotation is due.
	Skip { next_due: Option<Duration> },
	/// The configured interval is shorter than the policy allows.
	BelowMinimum {
		interval: Duration,
		minimum: Duration,
	},
}

impl Decision {
	pub fn as_str(&self) -> &'static str {
		match self {
			Decision::Generate => "generate",
			Decision::Rotate => "rotate",
			Decision::Defer { .. } => "defer",
			Decision::Skip { .. } => "skip",
			Decision::BelowMinimum { .. } => "below_minimum",
		}
	}

	/// Whether the field gets new material this cycle.
	pub fn produces_material(&self) -> bool {
		matches!(self, Decision::Generate | Decision::Rotate)
	}
}

/// Decide what to do with a field at `now`.
///
/// A missing value is generated immediately regardless of the window gate.
/// The minimum interval check only applies to values that could rotate, and
/// runs before the baseline and due checks so the refusal is reported every cycle.
pub fn decide(
	state: &FieldState,
	min_interval: Duration,
	windows: &MaintenanceWindows,
	now: DateTime<Utc>,
) -> Decision {
	if !state.has_value {
		return Decision::Generate;
	}

	let Some(interval) = state.interval else {
		return Decision::Skip { next_due: None };
	};

	if interval < min_interval {
		return Decision::BelowMinimum {
			interval,
			minimum: min_interval,
		};
	}

	let Some(baseline) = state.baseline else {
		return Decision::Skip {
			next_due: Some(interval),
		};
	};

	// A stamp in the future counts as just written.
	let elapsed = (now - baseline).to_std().unwrap_or(Duration::ZERO);
	if elapsed < interval {
		return Decision::Skip {
			next_due: Some(interval - elapsed),
		};
	}

	if windows.is_in_any_window(now) {
		Decision::Rotate
	} else {
		Decision::Defer {
			wait: windows.duration_until_next_window(now),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::window::MaintenanceWindow;
	use chrono::TimeZone;
	use proptest::prelude::*;

	const MIN: Duration = Duration::from_secs(5 * 60);
	const DAY: Duration = Duration::from_secs(24 * 3600);

	fn utc(d: u32, h: u32) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 2, d, h, 0, 0).unwrap()
	}

	fn weekend() -> MaintenanceWindows {
		let w =
			MaintenanceWindow::new(None, &["saturday", "sunday"], "03:00", "05:00", "UTC").unwrap();
		MaintenanceWindows::new(true, vec![w]).unwrap()
	}

	fn state(has_value: bool, interval: Option<Duration>, baseline: Option<DateTime<Utc>>) -> FieldState {
		FieldState {
			has_value,
			interval,
			baseline,
		}
	}

	#[test]
	fn missing_value_is_generated_outside_windows() {
		// Monday noon, weekend-only window.
		let d = decide(&state(false, Some(DAY), None), MIN, &weekend(), utc(2, 12));
		assert_eq!(d, Decision::Generate);
	}

	#[test]
	fn no_interval_never_rotates() {
		let d = decide(&state(true, None, Some(utc(1, 0))), MIN, &weekend(), utc(7, 4));
		assert_eq!(d, Decision::Skip { next_due: None });
	}

	#[test]
	fn missing_baseline_waits_a_full_interval() {
		let d = decide(&state(true, Some(DAY), None), MIN, &MaintenanceWindows::disabled(), utc(2, 12));
		assert_eq!(d, Decision::Skip { next_due: Some(DAY) });
	}

	#[test]
	fn below_minimum_is_refused_even_when_not_due() {
		let interval = Duration::from_secs(30);
		let d = decide(
			&state(true, Some(interval), Some(utc(2, 12))),
			MIN,
			&MaintenanceWindows::disabled(),
			utc(2, 12),
		);
		assert_eq!(
			d,
			Decision::BelowMinimum {
				interval,
				minimum: MIN
			}
		);
	}

	#[test]
	fn below_minimum_without_baseline_is_refused() {
		let interval = Duration::from_secs(10);
		let d = decide(&state(true, Some(interval), None), MIN, &weekend(), utc(2, 12));
		assert_eq!(
			d,
			Decision::BelowMinimum {
				interval,
				minimum: MIN
			}
		);
	}

	#[test]
	fn interval_equal_to_minimum_is_allowed() {
		let d = decide(
			&state(true, Some(MIN), Some(utc(2, 11))),
			MIN,
			&MaintenanceWindows::disabled(),
			utc(2, 12),
		);
		assert_eq!(d, Decision::Rotate);
	}

	#[test]
	fn not_yet_due_reports_remaining_time() {
		let d = decide(
			&state(true, Some(DAY), Some(utc(2, 0))),
			MIN,
			&MaintenanceWindows::disabled(),
			utc(2, 6),
		);
		assert_eq!(
			d,
			Decision::Skip {
				next_due: Some(Duration::from_secs(18 * 3600))
			}
		);
	}

	#[test]
	fn due_outside_window_is_deferred_until_it_opens() {
		// Due since Monday, checked Friday 03:00; window opens Saturday 03:00.
		let d = decide(&state(true, Some(DAY), Some(utc(1, 0))), MIN, &weekend(), utc(6, 3));
		assert_eq!(d, Decision::Defer { wait: DAY });
	}

	#[test]
	fn due_inside_window_rotates() {
		let d = decide(&state(true, Some(DAY), Some(utc(1, 0))), MIN, &weekend(), utc(7, 4));
		assert_eq!(d, Decision::Rotate);
	}

	#[test]
	fn disabled_windows_rotate_whenever_due() {
		let d = decide(
			&state(true, Some(DAY), Some(utc(1, 0))),
			MIN,
			&MaintenanceWindows::disabled(),
			utc(4, 15),
		);
		assert_eq!(d, Decision::Rotate);
	}

	#[test]
	fn future_baseline_counts_as_fresh() {
		let d = decide(
			&state(true, Some(DAY), Some(utc(3, 0))),
			MIN,
			&MaintenanceWindows::disabled(),
			utc(2, 0),
		);
		assert_eq!(d, Decision::Skip { next_due: Some(DAY) });
	}

	proptest! {
		#[test]
		fn below_minimum_never_rotates(
			interval_secs in 1u64..300,
			elapsed_secs in 0u64..(30 * 24 * 3600),
			stamped in any::<bool>(),
			gate in 0usize..3,
			hour in 0u32..24,
		) {
			// Saturday 7th: hours 03 and 04 fall inside the weekend window.
			let now = utc(7, hour);
			let baseline = now - chrono::Duration::seconds(elapsed_secs as i64);
			let windows = match gate {
				0 => MaintenanceWindows::disabled(),
				1 => weekend(),
				_ => {
					let w = MaintenanceWindow::new(None, &["monday"], "03:00", "04:00", "UTC").unwrap();
					MaintenanceWindows::new(true, vec![w]).unwrap()
				}
			};
			let d = decide(
				&state(true, Some(Duration::from_secs(interval_secs)), stamped.then_some(baseline)),
				MIN,
				&windows,
				now,
			);
			let is_below_minimum = matches!(d, Decision::BelowMinimum { .. });
			prop_assert!(is_below_minimum);
		}

		#[test]
		fn skip_delay_lands_on_due_time(
			interval_secs in 300u64..(10 * 24 * 3600),
			elapsed_secs in 0u64..(10 * 24 * 3600),
		) {
			let now = utc(2, 12);
			let baseline = now - chrono::Duration::seconds(elapsed_secs as i64);
			let d = decide(
				&state(true, Some(Duration::from_secs(interval_secs)), Some(baseline)),
				MIN,
				&MaintenanceWindows::disabled(),
				now,
			);
			if elapsed_secs < interval_secs {
				prop_assert_eq!(
					d,
					Decision::Skip { next_due: Some(Duration::from_secs(interval_secs - elapsed_secs)) }
				);
			} else {
				prop_assert_eq!(d, Decision::Rotate);
			}
		}
	}
}
