// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

/// Folds per-field wake candidates into the single earliest delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WakeScheduler {
	next: Option<Duration>,
}

impl WakeScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn observe(&mut self, candidate: Duration) {
		self.next = Some(match self.next {
			Some(current) => current.min(candidate),
			None => candidate,
		});
	}

	pub fn observe_opt(&mut self, candidate: Option<Duration>) {
		if let Some(candidate) = candidate {
			self.observe(candidate);
		}
	}

	/// `None` when nothing needs a wake-up.
	pub fn delay(&self) -> Option<Duration> {
		self.next
	}
}
