// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! [`EventSink`] implementations.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::ObjectReference;
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use kube::Client;
use tracing::{info, warn};
use warden_core::{EventSink, ManagedObject, Notification, Reason, Severity};

/// Controller name reported on recorded events.
pub const REPORTER: &str = "warden";

fn object_reference(object: &ManagedObject) -> ObjectReference {
	ObjectReference {
		api_version: Some("v1".to_string()),
		kind: Some("Secret".to_string()),
		name: Some(object.name.clone()),
		namespace: Some(object.namespace.clone()),
		resource_version: object.resource_version.clone(),
		..Default::default()
	}
}

fn action(reason: Reason) -> &'static str {
	match reason {
		Reason::GenerationSucceeded | Reason::GenerationFailed => "Generate",
		Reason::RotationSucceeded | Reason::RotationFailed => "Rotate",
	}
}

fn event(notification: &Notification) -> Event {
	Event {
		type_: match notification.severity {
			Severity::Normal => EventType::Normal,
			Severity::Warning => EventType::Warning,
		},
		reason: notification.reason.as_str().to_string(),
		note: Some(notification.message.clone()),
		action: action(notification.reason).to_string(),
		secondary: None,
	}
}

/// Records Kubernetes events against the Secret.
pub struct KubeEventSink {
	recorder: Recorder,
}

impl KubeEventSink {
	pub fn new(client: Client) -> Self {
		let reporter = Reporter {
			controller: REPORTER.to_string(),
			instance: std::env::var("HOSTNAME").ok(),
		};
		Self {
			recorder: Recorder::new(client, reporter),
		}
	}
}

#[async_trait]
impl EventSink for KubeEventSink {
	async fn publish(&self, object: &ManagedObject, notification: &Notification) {
		let reference = object_reference(object);
		if let Err(e) = self.recorder.publish(&event(notification), &reference).await {
			warn!(
				secret = %object.key(),
				reason = %notification.reason,
				error = %e,
				"failed to record event"
			);
		}
	}
}

/// Writes notifications to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
	async fn publish(&self, object: &ManagedObject, notification: &Notification) {
		match notification.severity {
			Severity::Normal => info!(
				secret = %object.key(),
				reason = %notification.reason,
				"{}",
				notification.message
			),
			Severity::Warning => warn!(
				secret = %object.key(),
				reason = %notification.reason,
				"{}",
				notification.message
			),
		}
	}
}
