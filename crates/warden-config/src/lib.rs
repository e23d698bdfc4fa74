// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process configuration for warden.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validation at load time, so a bad maintenance window stops the process
//!   before it touches any secret
//! - Consistent environment variable naming (`WARDEN_*`)
//!
//! # Usage
//!
//! ```ignore
//! use warden_config::load_config;
//!
//! let config = load_config()?;
//! let engine_config = config.engine_config()?;
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::WardenConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, SYSTEM_CONFIG_PATH,
};

use tracing::{debug, info};
use warden_core::EngineConfig;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WardenConfig {
	pub defaults: DefaultsConfig,
	pub rotation: RotationConfig,
	pub logging: LoggingConfig,
}

impl WardenConfig {
	/// Build the engine's immutable settings.
	pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
		Ok(EngineConfig {
			defaults: self.defaults.generation_defaults()?,
			rotation: self.rotation.policy()?,
			windows: self.rotation.maintenance_windows.build()?,
		})
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`WARDEN_*`)
/// 2. Config file (`/etc/warden/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<WardenConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<WardenConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and validate the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<WardenConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = WardenConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize a merged layer, failing on anything the engine could not use.
pub fn finalize(layer: WardenConfigLayer) -> Result<WardenConfig, ConfigError> {
	let config = WardenConfig {
		defaults: layer.defaults.unwrap_or_default().finalize(),
		rotation: layer.rotation.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
	};

	let engine = config.engine_config()?;

	info!(
		default_type = %config.defaults.generation_type,
		default_length = config.defaults.length,
		min_interval = %config.rotation.min_interval,
		create_events = config.rotation.create_events,
		maintenance_windows_enabled = engine.windows.is_enabled(),
		maintenance_windows = engine.windows.windows().len(),
		"configuration loaded"
	);

	Ok(config)
}
