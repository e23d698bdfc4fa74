// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `warden`: run a reconciliation, validate configuration, inspect windows.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warden_config::{LogFormat, LoggingConfig, WardenConfig};
use warden_core::{
	format_duration, format_timestamp, Decision, Engine, EventSink, MaintenanceWindows,
	ReconcileOutcome, Reconciler, SystemClock,
};
use warden_generator::SecretGenerator;
use warden_k8s::{KubeEventSink, KubeSecretStore, TracingEventSink};

/// Attempts for a reconciliation that keeps hitting write conflicts.
const MAX_CONFLICT_RETRIES: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long, env = "WARDEN_CONFIG")]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Reconcile one Secret against the cluster
	Reconcile {
		#[arg(long, short = 'n', default_value = "default")]
		namespace: String,

		#[arg(long)]
		name: String,

		/// Log events instead of recording them on the Secret
		#[arg(long)]
		no_events: bool,
	},

	/// Validate configuration and print a summary
	CheckConfig,

	/// Show maintenance window status
	Windows {
		/// Evaluate at this RFC3339 instant instead of now
		#[arg(long)]
		at: Option<DateTime<Utc>>,
	},
}

fn subscriber(logging: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
	let registry = tracing_subscriber::registry().with(filter);

	match logging.format {
		LogFormat::Json => Box::new(registry.with(fmt::layer().json())),
		LogFormat::Compact => Box::new(registry.with(fmt::layer().compact())),
		LogFormat::Pretty => Box::new(registry.with(fmt::layer().pretty())),
	}
}

fn init_tracing(logging: &LoggingConfig) {
	subscriber(logging).init();
}

/// Logging settings known before the configuration file is read.
fn bootstrap_logging(args: &Args) -> LoggingConfig {
	let mut logging = LoggingConfig::default();
	apply_logging_flags(&mut logging, args);
	logging
}

fn apply_logging_flags(logging: &mut LoggingConfig, args: &Args) {
	if let Some(level) = &args.log_level {
		logging.level = level.clone();
	}
	if args.json_logs {
		logging.format = LogFormat::Json;
	}
}

fn load_config(args: &Args) -> Result<WardenConfig> {
	let mut config = match &args.config {
		Some(path) => warden_config::load_config_with_file(path),
		None => warden_config::load_config(),
	}
	.context("failed to load configuration")?;

	apply_logging_flags(&mut config.logging, args);
	Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	// Config loading logs through a provisional subscriber until the configured one is installed.
	let config = tracing::subscriber::with_default(subscriber(&bootstrap_logging(&args)), || {
		load_config(&args)
	})?;
	init_tracing(&config.logging);

	match &args.command {
		Command::Reconcile {
			namespace,
			name,
			no_events,
		} => reconcile(&config, namespace, name, *no_events).await,
		Command::CheckConfig => check_config(&config),
		Command::Windows { at } => show_windows(&config, (*at).unwrap_or_else(Utc::now)),
	}
}

async fn reconcile(config: &WardenConfig, namespace: &str, name: &str, no_events: bool) -> Result<()> {
	let engine_config = config.engine_config()?;
	let generator = SecretGenerator::with_charset(config.defaults.charset());
	let engine = Engine::new(engine_config, Arc::new(generator));

	let store = KubeSecretStore::try_default().await?;
	let events: Arc<dyn EventSink> = if no_events {
		Arc::new(TracingEventSink)
	} else {
		Arc::new(KubeEventSink::new(store.client()))
	};
	let reconciler = Reconciler::new(Arc::new(store), events, engine, Arc::new(SystemClock));

	let mut attempt = 1;
	let outcome = loop {
		match reconciler.reconcile(namespace, name).await {
			Ok(outcome) => break outcome,
			Err(e) if e.is_conflict() && attempt < MAX_CONFLICT_RETRIES => {
				warn!(attempt, error = %e, "write conflict, retrying with a fresh read");
				attempt += 1;
			}
			Err(e) => return Err(e).with_context(|| format!("failed to reconcile {namespace}/{name}")),
		}
	};

	print_outcome(&outcome);
	Ok(())
}

fn print_outcome(outcome: &ReconcileOutcome) {
	for field in &outcome.fields {
		let detail = match (&field.error, field.decision) {
			(Some(error), _) => format!("failed: {error}"),
			(None, Decision::Defer { wait }) => format!("deferred for {}", format_duration(wait)),
			(None, Decision::Skip { next_due: Some(due) }) => {
				format!("due in {}", format_duration(due))
			}
			(None, Decision::BelowMinimum { interval, minimum }) => format!(
				"interval {} below minimum {}",
				format_duration(interval),
				format_duration(minimum)
			),
			(None, decision) => decision.as_str().to_string(),
		};
		println!("{:<24} {detail}", field.field);
	}
	println!("updated: {}", outcome.updated);
	match outcome.requeue_after {
		Some(delay) => println!("requeue after: {}", format_duration(delay)),
		None => println!("requeue after: never"),
	}
}

fn check_config(config: &WardenConfig) -> Result<()> {
	let engine = config.engine_config()?;
	info!("configuration is valid");

	println!("defaults:");
	println!("  type: {}", config.defaults.generation_type);
	println!("  length: {}", config.defaults.length);
	println!("  rsa bits: {}", config.defaults.rsa_bits);
	println!("  curve: {}", config.defaults.curve);
	println!("  charset size: {}", config.defaults.charset().chars().count());
	println!("rotation:");
	println!("  min interval: {}", format_duration(engine.rotation.min_interval));
	println!("  create events: {}", engine.rotation.create_events);
	print_windows(&engine.windows);
	Ok(())
}

fn print_windows(windows: &MaintenanceWindows) {
	if !windows.is_enabled() {
		println!("maintenance windows: disabled");
		return;
	}
	println!("maintenance windows:");
	for window in windows.windows() {
		println!("  {window}");
	}
}

fn show_windows(config: &WardenConfig, at: DateTime<Utc>) -> Result<()> {
	let windows = config.rotation.maintenance_windows.build()?;
	print_windows(&windows);
	if !windows.is_enabled() {
		println!("rotation allowed at {}", format_timestamp(at));
		return Ok(());
	}

	match windows.active_window(at) {
		Some(window) => println!(
			"inside window at {}: {}",
			format_timestamp(at),
			window.name().unwrap_or("(unnamed)")
		),
		None => {
			println!("outside all windows at {}", format_timestamp(at));
			if let Some(next) = windows.next_window_start(at) {
				println!(
					"next window opens {} (in {})",
					format_timestamp(next),
					format_duration(windows.duration_until_next_window(at))
				);
			}
		}
	}
	Ok(())
}
