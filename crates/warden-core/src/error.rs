// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the decision engine and reconciler.

use thiserror::Error;
use warden_generator::GeneratorError;

use crate::events::Notification;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that abort a whole evaluation.
#[derive(Debug, Error)]
pub enum EngineError {
	/// First-time generation failed; nothing was written.
	#[error("failed to generate value for field {field}: {source}")]
	GenerationFailed {
		field: String,
		#[source]
		source: GeneratorError,
		/// Warnings collected up to and including the failure.
		notifications: Vec<Notification>,
	},
}

impl EngineError {
	pub fn notifications(&self) -> &[Notification] {
		match self {
			EngineError::GenerationFailed { notifications, .. } => notifications,
		}
	}
}

/// Errors surfaced by a [`SecretStore`](crate::reconcile::SecretStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
	/// The object changed since it was read.
	#[error("conflict updating {key}: the object has been modified")]
	Conflict { key: String },

	#[error("store error: {0}")]
	Backend(String),
}

/// Errors returned by [`Reconciler::reconcile`](crate::reconcile::Reconciler::reconcile).
#[derive(Debug, Error)]
pub enum ReconcileError {
	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Engine(#[from] EngineError),
}

impl ReconcileError {
	/// Conflicts are retried by the caller with a fresh read.
	pub fn is_conflict(&self) -> bool {
		matches!(self, ReconcileError::Store(StoreError::Conflict { .. }))
	}
}
