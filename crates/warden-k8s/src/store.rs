// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! [`SecretStore`] backed by core/v1 Secrets.

use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::{Api, PostParams};
use kube::Client;
use tracing::{debug, instrument};
use warden_common_secret::SecretBytes;
use warden_core::{ManagedObject, SecretStore, StoreError};

use crate::error::K8sError;

/// Snapshot a Secret. `stringData` is write-only on the API and ignored.
pub fn managed_object_from_secret(secret: &Secret) -> ManagedObject {
	let metadata = &secret.metadata;
	ManagedObject {
		namespace: metadata.namespace.clone().unwrap_or_default(),
		name: metadata.name.clone().unwrap_or_default(),
		resource_version: metadata.resource_version.clone(),
		annotations: metadata.annotations.clone().unwrap_or_default(),
		data: secret
			.data
			.iter()
			.flatten()
			.map(|(k, v)| (k.clone(), SecretBytes::from(v.0.clone())))
			.collect(),
	}
}

/// Copy the object's data, annotations and resource version onto `secret`,
/// leaving everything else (labels, owner references, type) untouched.
pub fn apply_to_secret(object: &ManagedObject, secret: &mut Secret) {
	secret.metadata.annotations = Some(object.annotations.clone());
	secret.metadata.resource_version = object.resource_version.clone();
	let data: BTreeMap<String, ByteString> = object
		.data
		.iter()
		.map(|(k, v)| (k.clone(), ByteString(v.expose().clone())))
		.collect();
	secret.data = Some(data);
}

/// Production store using the kube crate.
pub struct KubeSecretStore {
	client: Client,
}

impl KubeSecretStore {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	/// Auto-discover cluster configuration: in-cluster service account,
	/// then `KUBECONFIG`, then `~/.kube/config`.
	pub async fn try_default() -> Result<Self, K8sError> {
		let client = Client::try_default()
			.await
			.map_err(|e| K8sError::ClientInit {
				message: e.to_string(),
			})?;
		debug!("K8s client initialized");
		Ok(Self { client })
	}

	pub fn client(&self) -> Client {
		self.client.clone()
	}

	fn api(&self, namespace: &str) -> Api<Secret> {
		Api::namespaced(self.client.clone(), namespace)
	}

	async fn fetch(&self, namespace: &str, name: &str) -> Result<Option<Secret>, K8sError> {
		Ok(self.api(namespace).get_opt(name).await?)
	}

	async fn replace(&self, object: &ManagedObject) -> Result<ManagedObject, K8sError> {
		let mut secret = self
			.fetch(&object.namespace, &object.name)
			.await?
			.ok_or_else(|| K8sError::SecretNotFound {
				namespace: object.namespace.clone(),
				name: object.name.clone(),
			})?;
		apply_to_secret(object, &mut secret);

		match self
			.api(&object.namespace)
			.replace(&object.name, &PostParams::default(), &secret)
			.await
		{
			Ok(stored) => Ok(managed_object_from_secret(&stored)),
			Err(kube::Error::Api(err)) if err.code == 409 => Err(K8sError::Conflict {
				namespace: object.namespace.clone(),
				name: object.name.clone(),
			}),
			Err(e) => Err(e.into()),
		}
	}
}

#[async_trait]
impl SecretStore for KubeSecretStore {
	#[instrument(skip(self))]
	async fn get(&self, namespace: &str, name: &str) -> Result<Option<ManagedObject>, StoreError> {
		let secret = self.fetch(namespace, name).await?;
		Ok(secret.as_ref().map(managed_object_from_secret))
	}

	#[instrument(skip(self, object), fields(secret = %object.key()))]
	async fn update(&self, object: &ManagedObject) -> Result<ManagedObject, StoreError> {
		let stored = self.replace(object).await?;
		debug!(resource_version = ?stored.resource_version, "secret updated");
		Ok(stored)
	}
}
