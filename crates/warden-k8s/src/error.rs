// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;
use warden_core::StoreError;

/// Result type alias for K8s operations.
pub type K8sResult<T> = Result<T, K8sError>;

/// Errors that can occur during K8s operations.
#[derive(Error, Debug)]
pub enum K8sError {
	#[error("K8s API error: {message}")]
	ApiError { message: String },

	#[error("Secret not found: {namespace}/{name}")]
	SecretNotFound { namespace: String, name: String },

	#[error("Secret {namespace}/{name} was modified concurrently")]
	Conflict { namespace: String, name: String },

	#[error("Failed to build K8s client: {message}")]
	ClientInit { message: String },
}

impl From<kube::Error> for K8sError {
	fn from(err: kube::Error) -> Self {
		K8sError::ApiError {
			message: err.to_string(),
		}
	}
}

impl From<K8sError> for StoreError {
	fn from(err: K8sError) -> Self {
		match err {
			K8sError::Conflict { namespace, name } => StoreError::Conflict {
				key: format!("{namespace}/{name}"),
			},
			other => StoreError::Backend(other.to_string()),
		}
	}
}
