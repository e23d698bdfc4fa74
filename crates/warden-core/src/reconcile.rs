// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read, evaluate, write back, publish.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::clock::Clock;
use crate::engine::{Engine, FieldOutcome};
use crate::error::{ReconcileError, StoreError};
use crate::events::Notification;
use crate::object::ManagedObject;

/// Persistence of managed objects.
#[async_trait]
pub trait SecretStore: Send + Sync {
	/// `Ok(None)` when the object does not exist.
	async fn get(&self, namespace: &str, name: &str) -> Result<Option<ManagedObject>, StoreError>;

	/// Write the object, failing with [`StoreError::Conflict`] when its
	/// resource version is stale. Returns the stored object.
	async fn update(&self, object: &ManagedObject) -> Result<ManagedObject, StoreError>;
}

/// Event recording. Publishing is best effort.
#[async_trait]
pub trait EventSink: Send + Sync {
	async fn publish(&self, object: &ManagedObject, notification: &Notification);
}

/// Result of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutcome {
	pub requeue_after: Option<Duration>,
	/// Whether the object was written.
	pub updated: bool,
	pub fields: Vec<FieldOutcome>,
}

pub struct Reconciler {
	store: Arc<dyn SecretStore>,
	events: Arc<dyn EventSink>,
	engine: Engine,
	clock: Arc<dyn Clock>,
}

impl Reconciler {
	pub fn new(
		store: Arc<dyn SecretStore>,
		events: Arc<dyn EventSink>,
		engine: Engine,
		clock: Arc<dyn Clock>,
	) -> Self {
		Self {
			store,
			events,
			engine,
			clock,
		}
	}

	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	/// Run one cycle for `namespace/name`.
	///
	/// Warnings are published before the write, success events only once the
	/// write went through. A missing object is not an error.
	#[instrument(skip(self))]
	pub async fn reconcile(
		&self,
		namespace: &str,
		name: &str,
	) -> Result<ReconcileOutcome, ReconcileError> {
		let Some(object) = self.store.get(namespace, name).await? else {
			info!("secret not found, nothing to do");
			return Ok(ReconcileOutcome::default());
		};

		let now = self.clock.now();
		let evaluation = match self.engine.evaluate(&object, now) {
			Ok(evaluation) => evaluation,
			Err(e) => {
				for notification in e.notifications() {
					self.events.publish(&object, notification).await;
				}
				return Err(e.into());
			}
		};

		let (warnings, normal): (Vec<_>, Vec<_>) = evaluation
			.notifications
			.iter()
			.partition(|n| n.is_warning());
		for notification in warnings {
			self.events.publish(&object, notification).await;
		}

		let updated = match &evaluation.object {
			Some(changed) => {
				let stored = self.store.update(changed).await.map_err(|e| {
					warn!(error = %e, "failed to update secret");
					e
				})?;
				for notification in normal {
					self.events.publish(&stored, notification).await;
				}
				info!(
					generated = ?evaluation.fields_with("generate"),
					rotated = ?evaluation.fields_with("rotate"),
					"updated secret"
				);
				true
			}
			None => false,
		};

		if let Some(delay) = evaluation.requeue_after {
			info!(requeue_after = ?delay, "scheduling next reconciliation");
		}

		Ok(ReconcileOutcome {
			requeue_after: evaluation.requeue_after,
			updated,
			fields: evaluation.outcomes,
		})
	}
}
