// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported generation types and ECDSA curves.

use std::fmt;
use std::str::FromStr;

use crate::error::GeneratorError;

/// The kind of material generated for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationType {
	/// Random characters drawn from a charset.
	String,
	/// Raw random bytes.
	Bytes,
	Rsa,
	Ecdsa,
	Ed25519,
}

impl GenerationType {
	pub fn as_str(&self) -> &'static str {
		match self {
			GenerationType::String => "string",
			GenerationType::Bytes => "bytes",
			GenerationType::Rsa => "rsa",
			GenerationType::Ecdsa => "ecdsa",
			GenerationType::Ed25519 => "ed25519",
		}
	}

	/// Keypair types produce a private and a public entry.
	pub fn is_keypair(&self) -> bool {
		matches!(
			self,
			GenerationType::Rsa | GenerationType::Ecdsa | GenerationType::Ed25519
		)
	}
}

impl fmt::Display for GenerationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GenerationType {
	type Err = GeneratorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"string" => Ok(GenerationType::String),
			"bytes" => Ok(GenerationType::Bytes),
			"rsa" => Ok(GenerationType::Rsa),
			"ecdsa" => Ok(GenerationType::Ecdsa),
			"ed25519" => Ok(GenerationType::Ed25519),
			other => Err(GeneratorError::UnknownType(other.to_string())),
		}
	}
}

/// Named NIST curves accepted for ECDSA keypairs.
///
/// Names are matched exactly: `p-256` or `P256` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
	P256,
	P384,
	P521,
}

impl EcdsaCurve {
	pub fn as_str(&self) -> &'static str {
		match self {
			EcdsaCurve::P256 => "P-256",
			EcdsaCurve::P384 => "P-384",
			EcdsaCurve::P521 => "P-521",
		}
	}
}

impl fmt::Display for EcdsaCurve {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EcdsaCurve {
	type Err = GeneratorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"P-256" => Ok(EcdsaCurve::P256),
			"P-384" => Ok(EcdsaCurve::P384),
			"P-521" => Ok(EcdsaCurve::P521),
			other => Err(GeneratorError::UnsupportedCurve(other.to_string())),
		}
	}
}
