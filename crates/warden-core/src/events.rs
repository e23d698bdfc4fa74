// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notifications attached to a managed object.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Normal,
	Warning,
}

impl Severity {
	pub fn as_str(&self) -> &'static str {
		match self {
			Severity::Normal => "Normal",
			Severity::Warning => "Warning",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
	GenerationSucceeded,
	GenerationFailed,
	RotationSucceeded,
	RotationFailed,
}

impl Reason {
	pub fn as_str(&self) -> &'static str {
		match self {
			Reason::GenerationSucceeded => "GenerationSucceeded",
			Reason::GenerationFailed => "GenerationFailed",
			Reason::RotationSucceeded => "RotationSucceeded",
			Reason::RotationFailed => "RotationFailed",
		}
	}
}

impl fmt::Display for Reason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single event. Messages never contain generated material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
	pub severity: Severity,
	pub reason: Reason,
	pub message: String,
}

impl Notification {
	pub fn normal(reason: Reason, message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Normal,
			reason,
			message: message.into(),
		}
	}

	pub fn warning(reason: Reason, message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Warning,
			reason,
			message: message.into(),
		}
	}

	pub fn is_warning(&self) -> bool {
		self.severity == Severity::Warning
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reasons_use_their_variant_names() {
		assert_eq!(Reason::GenerationSucceeded.as_str(), "GenerationSucceeded");
		assert_eq!(Reason::RotationFailed.to_string(), "RotationFailed");
	}

	#[test]
	fn constructors_set_severity() {
		assert!(Notification::warning(Reason::GenerationFailed, "boom").is_warning());
		let ok = Notification::normal(Reason::RotationSucceeded, "ok");
		assert_eq!(ok.severity.as_str(), "Normal");
		assert!(!ok.is_warning());
	}
}
