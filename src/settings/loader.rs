use anyhow::{Context, Result};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Layer config files, `RAGDECK__*` variables, and CLI flags, then validate.
///
/// CLI flags are applied after deserialization so they win over every file
/// and environment source.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let layered = build_config(cli)?;
	let mut raw: RawConfig = layered
		.try_deserialize()
		.context("configuration does not match the expected sections")?;
	raw.apply_cli_overrides(cli);
	let resolved = raw.resolve(cli)?;
	tracing::debug!(
		backend = %resolved.backend_url,
		theme = %resolved.theme_name,
		view = %resolved.start_view,
		"configuration resolved"
	);
	Ok(resolved)
}
