// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory collaborators for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::events::Notification;
use crate::object::ManagedObject;
use crate::reconcile::{EventSink, SecretStore};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct MockClock {
	now: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
	pub fn new(now: DateTime<Utc>) -> Self {
		Self {
			now: Arc::new(Mutex::new(now)),
		}
	}

	pub fn set(&self, now: DateTime<Utc>) {
		*lock(&self.now) = now;
	}

	pub fn advance(&self, by: Duration) {
		if let Ok(by) = chrono::Duration::from_std(by) {
			*lock(&self.now) += by;
		}
	}
}

impl Clock for MockClock {
	fn now(&self) -> DateTime<Utc> {
		*lock(&self.now)
	}
}

#[derive(Debug, Default)]
struct StoreState {
	objects: BTreeMap<(String, String), ManagedObject>,
	next_failure: Option<StoreError>,
	updates: usize,
	version: u64,
}

/// A store with resource-version conflict detection.
///
/// Every write bumps the resource version; writing an object whose version
/// does not match the stored one fails with [`StoreError::Conflict`].
#[derive(Debug, Clone, Default)]
pub struct MockSecretStore {
	state: Arc<Mutex<StoreState>>,
}

impl MockSecretStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `object` as-is, assigning it a fresh resource version.
	pub fn insert(&self, mut object: ManagedObject) {
		let mut state = lock(&self.state);
		state.version += 1;
		object.resource_version = Some(state.version.to_string());
		state
			.objects
			.insert((object.namespace.clone(), object.name.clone()), object);
	}

	pub fn get_object(&self, namespace: &str, name: &str) -> Option<ManagedObject> {
		lock(&self.state)
			.objects
			.get(&(namespace.to_string(), name.to_string()))
			.cloned()
	}

	/// Make the next `update` fail with `error`.
	pub fn fail_next_update(&self, error: StoreError) {
		lock(&self.state).next_failure = Some(error);
	}

	/// Number of successful writes.
	pub fn update_count(&self) -> usize {
		lock(&self.state).updates
	}
}

#[async_trait]
impl SecretStore for MockSecretStore {
	async fn get(&self, namespace: &str, name: &str) -> Result<Option<ManagedObject>, StoreError> {
		Ok(self.get_object(namespace, name))
	}

	async fn update(&self, object: &ManagedObject) -> Result<ManagedObject, StoreError> {
		let mut state = lock(&self.state);
		if let Some(error) = state.next_failure.take() {
			return Err(error);
		}

		let key = (object.namespace.clone(), object.name.clone());
		let current = state
			.objects
			.get(&key)
			.ok_or_else(|| StoreError::Backend(format!("{} not found", object.key())))?;
		if current.resource_version != object.resource_version {
			return Err(StoreError::Conflict { key: object.key() });
		}

		state.version += 1;
		state.updates += 1;
		let mut stored = object.clone();
		stored.resource_version = Some(state.version.to_string());
		state.objects.insert(key, stored.clone());
		Ok(stored)
	}
}

/// Records every published notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
	recorded: Arc<Mutex<Vec<(String, Notification)>>>,
}

impl RecordingEventSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// `(namespace/name, notification)` in publish order.
	pub fn recorded(&self) -> Vec<(String, Notification)> {
		lock(&self.recorded).clone()
	}

	pub fn reasons(&self) -> Vec<&'static str> {
		lock(&self.recorded)
			.iter()
			.map(|(_, n)| n.reason.as_str())
			.collect()
	}

	pub fn clear(&self) {
		lock(&self.recorded).clear();
	}
}

#[async_trait]
impl EventSink for RecordingEventSink {
	async fn publish(&self, object: &ManagedObject, notification: &Notification) {
		lock(&self.recorded).push((object.key(), notification.clone()));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn mock_clock_advances() {
		let start = Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap();
		let clock = MockClock::new(start);
		clock.advance(Duration::from_secs(90));
		assert_eq!(clock.now(), start + chrono::Duration::seconds(90));
		clock.set(start);
		assert_eq!(clock.now(), start);
	}

	#[tokio::test]
	async fn stale_resource_version_conflicts() {
		let store = MockSecretStore::new();
		store.insert(ManagedObject::new("default", "db"));
		let first = store.get("default", "db").await.unwrap().unwrap();
		let second = first.clone();

		store.update(&first).await.unwrap();
		let err = store.update(&second).await.unwrap_err();
		assert_eq!(
			err,
			StoreError::Conflict {
				key: "default/db".to_string()
			}
		);
		assert_eq!(store.update_count(), 1);
	}
}
