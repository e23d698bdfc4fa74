// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Generation defaults applied when a secret carries no annotation.

use serde::Deserialize;
use warden_core::GenerationDefaults;
use warden_generator::{EcdsaCurve, GenerationType, MIN_RSA_BITS};

use crate::error::ConfigError;

/// Special characters mixed in when `special_chars` is on.
pub const DEFAULT_SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";

/// Generation defaults (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsConfig {
	pub generation_type: String,
	pub length: usize,
	pub rsa_bits: usize,
	pub curve: String,
	pub uppercase: bool,
	pub lowercase: bool,
	pub numbers: bool,
	pub special_chars: bool,
	pub allowed_special_chars: String,
}

impl Default for DefaultsConfig {
	fn default() -> Self {
		DefaultsConfigLayer::default().finalize()
	}
}

impl DefaultsConfig {
	/// Charset for `string` values: lowercase, uppercase, digits, specials.
	pub fn charset(&self) -> String {
		let mut charset = String::new();
		if self.lowercase {
			charset.push_str(LOWERCASE);
		}
		if self.uppercase {
			charset.push_str(UPPERCASE);
		}
		if self.numbers {
			charset.push_str(NUMBERS);
		}
		if self.special_chars {
			charset.push_str(&self.allowed_special_chars);
		}
		charset
	}

	/// Validate and convert into the engine's defaults.
	pub fn generation_defaults(&self) -> Result<GenerationDefaults, ConfigError> {
		let generation_type: GenerationType =
			self
				.generation_type
				.parse()
				.map_err(|e: warden_generator::GeneratorError| ConfigError::InvalidValue {
					key: "defaults.type".to_string(),
					message: e.to_string(),
				})?;
		if self.length == 0 {
			return Err(ConfigError::InvalidValue {
				key: "defaults.length".to_string(),
				message: "must be positive".to_string(),
			});
		}
		if self.rsa_bits < MIN_RSA_BITS {
			return Err(ConfigError::InvalidValue {
				key: "defaults.rsa_bits".to_string(),
				message: format!("must be at least {MIN_RSA_BITS}, got {}", self.rsa_bits),
			});
		}
		self
			.curve
			.parse::<EcdsaCurve>()
			.map_err(|e| ConfigError::InvalidValue {
				key: "defaults.curve".to_string(),
				message: e.to_string(),
			})?;
		if self.charset().is_empty() {
			return Err(ConfigError::Validation(
				"the default charset is empty: enable at least one of uppercase, lowercase, \
				 numbers or special_chars"
					.to_string(),
			));
		}

		Ok(GenerationDefaults {
			generation_type,
			length: self.length,
			rsa_bits: self.rsa_bits,
			curve: self.curve.clone(),
		})
	}
}

/// Generation defaults layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfigLayer {
	#[serde(default, rename = "type")]
	pub generation_type: Option<String>,
	#[serde(default)]
	pub length: Option<usize>,
	#[serde(default)]
	pub rsa_bits: Option<usize>,
	#[serde(default)]
	pub curve: Option<String>,
	#[serde(default)]
	pub uppercase: Option<bool>,
	#[serde(default)]
	pub lowercase: Option<bool>,
	#[serde(default)]
	pub numbers: Option<bool>,
	#[serde(default)]
	pub special_chars: Option<bool>,
	#[serde(default)]
	pub allowed_special_chars: Option<String>,
}

impl DefaultsConfigLayer {
	pub fn merge(&mut self, other: DefaultsConfigLayer) {
		if other.generation_type.is_some() {
			self.generation_type = other.generation_type;
		}
		if other.length.is_some() {
			self.length = other.length;
		}
		if other.rsa_bits.is_some() {
			self.rsa_bits = other.rsa_bits;
		}
		if other.curve.is_some() {
			self.curve = other.curve;
		}
		if other.uppercase.is_some() {
			self.uppercase = other.uppercase;
		}
		if other.lowercase.is_some() {
			self.lowercase = other.lowercase;
		}
		if other.numbers.is_some() {
			self.numbers = other.numbers;
		}
		if other.special_chars.is_some() {
			self.special_chars = other.special_chars;
		}
		if other.allowed_special_chars.is_some() {
			self.allowed_special_chars = other.allowed_special_chars;
		}
	}

	pub fn finalize(self) -> DefaultsConfig {
		DefaultsConfig {
			generation_type: self
				.generation_type
				.unwrap_or_else(|| GenerationType::String.to_string()),
			length: self.length.unwrap_or(32),
			rsa_bits: self.rsa_bits.unwrap_or(2048),
			curve: self
				.curve
				.unwrap_or_else(|| EcdsaCurve::P256.as_str().to_string()),
			uppercase: self.uppercase.unwrap_or(true),
			lowercase: self.lowercase.unwrap_or(true),
			numbers: self.numbers.unwrap_or(true),
			special_chars: self.special_chars.unwrap_or(false),
			allowed_special_chars: self
				.allowed_special_chars
				.unwrap_or_else(|| DEFAULT_SPECIAL_CHARS.to_string()),
		}
	}
}
