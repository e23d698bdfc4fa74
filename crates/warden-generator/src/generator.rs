// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The [`Generator`] seam and its CSPRNG backed implementation.

use rand::rngs::OsRng;
use rand::RngCore;
use warden_common_secret::SecretBytes;

use crate::error::{GeneratorError, Result};
use crate::keypair::{self, Keypair};
use crate::kinds::{EcdsaCurve, GenerationType};

/// Every printable ASCII character class, including specials.
pub const DEFAULT_CHARSET: &str =
	"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Letters and digits only.
pub const ALPHANUMERIC_CHARSET: &str =
	"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces secret material.
///
/// Keypair types are only reachable through their dedicated methods; calling
/// [`Generator::generate`] with one is rejected with
/// [`GeneratorError::KeypairType`].
pub trait Generator: Send + Sync {
	/// Random string from the generator's default charset.
	fn generate_string(&self, length: usize) -> Result<SecretBytes>;

	fn generate_string_with_charset(&self, length: usize, charset: &str) -> Result<SecretBytes>;

	fn generate_bytes(&self, length: usize) -> Result<SecretBytes>;

	/// Generate a `string` or `bytes` value.
	fn generate(&self, kind: GenerationType, length: usize) -> Result<SecretBytes>;

	fn generate_rsa_keypair(&self, bits: usize) -> Result<Keypair>;

	/// `curve` must be exactly one of `P-256`, `P-384` or `P-521`.
	fn generate_ecdsa_keypair(&self, curve: &str) -> Result<Keypair>;

	fn generate_ed25519_keypair(&self) -> Result<Keypair>;
}

/// [`Generator`] backed by the operating system's random source.
#[derive(Debug, Clone)]
pub struct SecretGenerator {
	charset: String,
}

impl SecretGenerator {
	/// Generator whose default charset is alphanumeric.
	pub fn new() -> Self {
		Self::with_charset(ALPHANUMERIC_CHARSET)
	}

	pub fn with_charset(charset: impl Into<String>) -> Self {
		Self {
			charset: charset.into(),
		}
	}

	pub fn charset(&self) -> &str {
		&self.charset
	}
}

impl Default for SecretGenerator {
	fn default() -> Self {
		Self::new()
	}
}

fn random_bytes(length: usize) -> Result<Vec<u8>> {
	let mut buf = vec![0u8; length];
	OsRng
		.try_fill_bytes(&mut buf)
		.map_err(|e| GeneratorError::RandomSource(e.to_string()))?;
	Ok(buf)
}

impl Generator for SecretGenerator {
	fn generate_string(&self, length: usize) -> Result<SecretBytes> {
		self.generate_string_with_charset(length, &self.charset)
	}

	fn generate_string_with_charset(&self, length: usize, charset: &str) -> Result<SecretBytes> {
		if length == 0 {
			return Err(GeneratorError::InvalidLength(length));
		}
		let alphabet: Vec<char> = charset.chars().collect();
		if alphabet.is_empty() {
			return Err(GeneratorError::EmptyCharset);
		}

		let mut raw = random_bytes(length)?;
		let value: String = raw
			.iter()
			.map(|b| alphabet[usize::from(*b) % alphabet.len()])
			.collect();
		raw.fill(0);

		Ok(SecretBytes::from(value.into_bytes()))
	}

	fn generate_bytes(&self, length: usize) -> Result<SecretBytes> {
		if length == 0 {
			return Err(GeneratorError::InvalidLength(length));
		}
		Ok(SecretBytes::from(random_bytes(length)?))
	}

	fn generate(&self, kind: GenerationType, length: usize) -> Result<SecretBytes> {
		match kind {
			GenerationType::String => self.generate_string(length),
			GenerationType::Bytes => self.generate_bytes(length),
			GenerationType::Rsa | GenerationType::Ecdsa | GenerationType::Ed25519 => {
				Err(GeneratorError::KeypairType(kind))
			}
		}
	}

	fn generate_rsa_keypair(&self, bits: usize) -> Result<Keypair> {
		keypair::rsa_keypair(bits)
	}

	fn generate_ecdsa_keypair(&self, curve: &str) -> Result<Keypair> {
		let curve: EcdsaCurve = curve.parse()?;
		keypair::ecdsa_keypair(curve)
	}

	fn generate_ed25519_keypair(&self) -> Result<Keypair> {
		keypair::ed25519_keypair()
	}
}
