// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file and the environment.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::WardenConfigLayer;
use crate::sections::{
	DefaultsConfigLayer, LogFormat, LoggingConfigLayer, MaintenanceWindowsConfigLayer,
	RotationConfigLayer,
};

/// Default location of the config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/warden/config.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<WardenConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(WardenConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(WardenConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: WardenConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `WARDEN_<SECTION>_<FIELD>`. Maintenance window definitions
/// only come from the config file; the environment can toggle them.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<WardenConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(WardenConfigLayer {
			defaults: Some(load_defaults_from_env()?),
			rotation: Some(load_rotation_from_env()?),
			logging: Some(load_logging_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid usize value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_defaults_from_env() -> Result<DefaultsConfigLayer, ConfigError> {
	Ok(DefaultsConfigLayer {
		generation_type: env_var("WARDEN_DEFAULT_TYPE"),
		length: env_usize("WARDEN_DEFAULT_LENGTH")?,
		rsa_bits: env_usize("WARDEN_DEFAULT_RSA_BITS")?,
		curve: env_var("WARDEN_DEFAULT_CURVE"),
		uppercase: env_bool("WARDEN_CHARSET_UPPERCASE"),
		lowercase: env_bool("WARDEN_CHARSET_LOWERCASE"),
		numbers: env_bool("WARDEN_CHARSET_NUMBERS"),
		special_chars: env_bool("WARDEN_CHARSET_SPECIAL_CHARS"),
		allowed_special_chars: env_var("WARDEN_CHARSET_ALLOWED_SPECIAL_CHARS"),
	})
}

fn load_rotation_from_env() -> Result<RotationConfigLayer, ConfigError> {
	let maintenance_windows =
		env_bool("WARDEN_MAINTENANCE_WINDOWS_ENABLED").map(|enabled| MaintenanceWindowsConfigLayer {
			enabled: Some(enabled),
			windows: None,
		});

	Ok(RotationConfigLayer {
		min_interval: env_var("WARDEN_ROTATION_MIN_INTERVAL"),
		create_events: env_bool("WARDEN_ROTATION_CREATE_EVENTS"),
		maintenance_windows,
	})
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	let format = env_var("WARDEN_LOG_FORMAT")
		.map(|v| {
			v.parse::<LogFormat>()
				.map_err(|message| ConfigError::InvalidValue {
					key: "WARDEN_LOG_FORMAT".to_string(),
					message,
				})
		})
		.transpose()?;

	Ok(LoggingConfigLayer {
		level: env_var("WARDEN_LOG_LEVEL"),
		format,
	})
}
