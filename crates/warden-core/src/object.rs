// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The managed object: a secret with data entries and annotations.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use warden_common_secret::SecretBytes;

use crate::annotations::{self, Annotations};

/// Snapshot of a secret as delivered by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagedObject {
	pub namespace: String,
	pub name: String,
	/// Opaque optimistic concurrency token.
	pub resource_version: Option<String>,
	pub annotations: Annotations,
	pub data: BTreeMap<String, SecretBytes>,
}

impl ManagedObject {
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
			..Default::default()
		}
	}

	pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.annotations.insert(key.into(), value.into());
		self
	}

	pub fn with_data(mut self, key: impl Into<String>, value: impl Into<SecretBytes>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}

	/// `namespace/name`
	pub fn key(&self) -> String {
		format!("{}/{}", self.namespace, self.name)
	}

	/// Annotation value, treating an empty value as absent.
	pub fn annotation(&self, key: &str) -> Option<&str> {
		self
			.annotations
			.get(key)
			.map(String::as_str)
			.filter(|v| !v.is_empty())
	}

	/// Fields listed in `autogenerate`, in list order.
	pub fn autogenerate_fields(&self) -> Vec<String> {
		self
			.annotation(annotations::AUTOGENERATE)
			.map(annotations::parse_fields)
			.unwrap_or_default()
	}

	/// A field counts as populated when its data entry is non-empty.
	pub fn has_value(&self, field: &str) -> bool {
		self.data.get(field).is_some_and(|v| !v.is_empty())
	}

	/// The shared `generated-at` stamp. Unparseable stamps count as absent.
	pub fn generated_at(&self) -> Option<DateTime<Utc>> {
		self
			.annotation(annotations::GENERATED_AT)
			.and_then(parse_timestamp)
	}

	pub fn field_generated_at(&self, field: &str) -> Option<DateTime<Utc>> {
		self
			.annotation(&annotations::field_key(annotations::GENERATED_AT, field))
			.and_then(parse_timestamp)
	}

	/// Per-field stamp, else the shared one.
	pub fn baseline(&self, field: &str) -> Option<DateTime<Utc>> {
		self
			.field_generated_at(field)
			.or_else(|| self.generated_at())
	}
}

/// RFC3339 in UTC at whole seconds.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
	t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value.trim())
		.ok()
		.map(|t| t.with_timezone(&Utc))
}
