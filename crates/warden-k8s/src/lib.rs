// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Kubernetes adapters for the warden reconciler.

pub mod error;
pub mod events;
pub mod store;

pub use error::{K8sError, K8sResult};
pub use events::{KubeEventSink, TracingEventSink, REPORTER};
pub use store::{apply_to_secret, managed_object_from_secret, KubeSecretStore};
