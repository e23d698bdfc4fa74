// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Annotation driven secret generation and rotation.
//!
//! A managed object lists the fields to populate in its `autogenerate`
//! annotation. Each cycle resolves the per-field settings, decides whether a
//! field is generated, rotated, deferred to a maintenance window or left
//! alone, and folds the per-field timers into one requeue delay.
//!
//! ```text
//! ManagedObject ─▶ ConfigResolver ─▶ decide ─▶ Generator ─▶ WakeScheduler
//!                                      ▲
//!                         MaintenanceWindows
//! ```

pub mod annotations;
pub mod clock;
pub mod decision;
pub mod duration;
pub mod engine;
pub mod error;
pub mod events;
pub mod object;
pub mod reconcile;
pub mod resolver;
pub mod scheduler;
pub mod testing;
pub mod window;

pub use annotations::Annotations;
pub use clock::{Clock, SystemClock};
pub use decision::{decide, Decision, FieldState, RotationPolicy};
pub use duration::{format_duration, parse_duration, DurationError};
pub use engine::{Engine, EngineConfig, Evaluation, FieldOutcome};
pub use error::{EngineError, ReconcileError, Result, StoreError};
pub use events::{Notification, Reason, Severity};
pub use object::{format_timestamp, parse_timestamp, ManagedObject};
pub use reconcile::{EventSink, ReconcileOutcome, Reconciler, SecretStore};
pub use resolver::{ConfigResolver, FieldSpec, GenerationDefaults};
pub use scheduler::WakeScheduler;
pub use window::{parse_day, parse_time, MaintenanceWindow, MaintenanceWindows, WindowError};
