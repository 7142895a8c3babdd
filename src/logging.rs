//! Tracing subscriber setup.
//!
//! The interactive panel owns the terminal, so its events go to a log file.
//! Headless commands write to stderr, leaving stdout for their output.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive that overrides the configured level.
pub const LOG_ENV: &str = "RAGDECK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
	Stderr,
	File(PathBuf),
}

/// Install the global subscriber. Calling it twice is an error.
pub fn initialize(level: &str, target: &LogTarget) -> Result<()> {
	let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), level)?;
	let builder = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false);

	match target {
		LogTarget::Stderr => builder
			.with_writer(std::io::stderr)
			.try_init()
			.map_err(|err| anyhow!("failed to install log subscriber: {err}"))?,
		LogTarget::File(path) => {
			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent)
					.with_context(|| format!("failed to create log directory {}", parent.display()))?;
			}
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(path)
				.with_context(|| format!("failed to open log file {}", path.display()))?;
			builder
				.with_ansi(false)
				.with_writer(Mutex::new(file))
				.try_init()
				.map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;
		}
	}
	Ok(())
}

/// Prefer a non-empty environment directive, falling back to `level`.
fn build_filter(directive: Option<&str>, level: &str) -> Result<EnvFilter> {
	let directive = directive
		.map(str::trim)
		.filter(|directive| !directive.is_empty())
		.unwrap_or(level);
	EnvFilter::try_new(directive).with_context(|| format!("invalid log filter '{directive}'"))
}
