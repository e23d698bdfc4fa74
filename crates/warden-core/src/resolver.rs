// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-field configuration resolution.
//!
//! Priority, highest first: `<key>.<field>` annotation, `<key>` annotation,
//! global default. Values that do not parse fall through to the next level
//! instead of failing the field; a typo in `rotate` must never block the
//! initial generation.

use std::time::Duration;

use warden_generator::{GeneratorError, GenerationType};

use crate::annotations::{self, Annotations};
use crate::duration::parse_duration;

/// Process-wide generation defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
	pub generation_type: GenerationType,
	/// Length of `string` and `bytes` values.
	pub length: usize,
	/// Bit size of `rsa` keys when no `length` annotation applies.
	pub rsa_bits: usize,
	pub curve: String,
}

impl Default for GenerationDefaults {
	fn default() -> Self {
		Self {
			generation_type: GenerationType::String,
			length: 32,
			rsa_bits: 2048,
			curve: "P-256".to_string(),
		}
	}
}

/// Effective settings of one field for the current cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
	pub name: String,
	/// Raw type name; validated when material is produced.
	pub type_name: String,
	/// Length for `string`/`bytes`, bit size for `rsa`.
	pub length: usize,
	pub curve: String,
	/// `None` when the field never rotates.
	pub rotation_interval: Option<Duration>,
}

impl FieldSpec {
	pub fn generation_type(&self) -> Result<GenerationType, GeneratorError> {
		self.type_name.parse()
	}
}

/// Resolves [`FieldSpec`]s from an object's annotations.
pub struct ConfigResolver<'a> {
	annotations: &'a Annotations,
	defaults: &'a GenerationDefaults,
}

impl<'a> ConfigResolver<'a> {
	pub fn new(annotations: &'a Annotations, defaults: &'a GenerationDefaults) -> Self {
		Self {
			annotations,
			defaults,
		}
	}

	pub fn field_type(&self, field: &str) -> String {
		annotations::cascade(self.annotations, annotations::TYPE, field)
			.next()
			.map(str::to_string)
			.unwrap_or_else(|| self.defaults.generation_type.to_string())
	}

	/// Positive integer from the cascade; RSA fields default to
	/// [`GenerationDefaults::rsa_bits`].
	pub fn field_length(&self, field: &str, type_name: &str) -> usize {
		annotations::cascade(self.annotations, annotations::LENGTH, field)
			.find_map(parse_length)
			.unwrap_or(if type_name == GenerationType::Rsa.as_str() {
				self.defaults.rsa_bits
			} else {
				self.defaults.length
			})
	}

	pub fn field_curve(&self, field: &str) -> String {
		annotations::cascade(self.annotations, annotations::CURVE, field)
			.next()
			.map(str::to_string)
			.unwrap_or_else(|| self.defaults.curve.clone())
	}

	/// A zero interval, like no interval at all, disables rotation.
	pub fn rotation_interval(&self, field: &str) -> Option<Duration> {
		annotations::cascade(self.annotations, annotations::ROTATE, field)
			.find_map(|v| parse_duration(v).ok())
			.filter(|d| !d.is_zero())
	}

	pub fn field_spec(&self, field: &str) -> FieldSpec {
		let type_name = self.field_type(field);
		FieldSpec {
			name: field.to_string(),
			length: self.field_length(field, &type_name),
			curve: self.field_curve(field),
			rotation_interval: self.rotation_interval(field),
			type_name,
		}
	}
}

fn parse_length(value: &str) -> Option<usize> {
	value.trim().parse::<usize>().ok().filter(|l| *l > 0)
}
