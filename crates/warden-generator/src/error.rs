// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for value generation.

use thiserror::Error;

use crate::kinds::GenerationType;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while producing secret material.
#[derive(Debug, Error)]
pub enum GeneratorError {
	#[error("length must be positive, got {0}")]
	InvalidLength(usize),

	#[error("charset must not be empty")]
	EmptyCharset,

	#[error("unknown generation type: {0}")]
	UnknownType(String),

	#[error("keypair type {0} must be generated using its dedicated keypair method")]
	KeypairType(GenerationType),

	#[error("RSA key size must be at least {minimum} bits, got {bits}")]
	RsaKeyTooSmall { bits: usize, minimum: usize },

	#[error("unsupported ECDSA curve: '{0}', must be 'P-256', 'P-384', or 'P-521'")]
	UnsupportedCurve(String),

	#[error("failed to read from the system random source: {0}")]
	RandomSource(String),

	#[error("failed to generate {algorithm} key: {message}")]
	KeyGeneration {
		algorithm: &'static str,
		message: String,
	},

	#[error("failed to encode {what}: {message}")]
	Encoding { what: &'static str, message: String },
}
