// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret material generation for warden.
//!
//! All randomness comes from the operating system CSPRNG. Values are returned
//! wrapped in [`warden_common_secret::Secret`] so they never reach a log line.

pub mod error;
pub mod generator;
pub mod keypair;
pub mod kinds;

pub use error::{GeneratorError, Result};
pub use generator::{Generator, SecretGenerator, ALPHANUMERIC_CHARSET, DEFAULT_CHARSET};
pub use keypair::{Keypair, MIN_RSA_BITS};
pub use kinds::{EcdsaCurve, GenerationType};
