// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod defaults;
mod logging;
mod rotation;

pub use defaults::{DefaultsConfig, DefaultsConfigLayer, DEFAULT_SPECIAL_CHARS};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use rotation::{
	MaintenanceWindowConfig, MaintenanceWindowsConfig, MaintenanceWindowsConfigLayer, RotationConfig,
	RotationConfigLayer,
};
