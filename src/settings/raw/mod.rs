use std::env;
use std::path::PathBuf;

use anyhow::{Error, Result};
use ragdeck::ui::theme;
use ragdeck::{PickerOptions, View};
use ragdeck_backend::{BackendError, DEFAULT_BASE_URL, ResultCount, parse_base_url};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

const DEFAULT_THEME: &str = "slate";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	backend: BackendSection,
	search: SearchSection,
	ui: UiSection,
	picker: PickerSection,
	logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BackendSection {
	url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	result_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	theme: Option<String>,
	start_view: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PickerSection {
	root: Option<PathBuf>,
	include_hidden: Option<bool>,
	max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
	level: Option<String>,
	file: Option<PathBuf>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(url) = &cli.backend_url {
			self.backend.url = Some(url.clone());
		}
		if let Some(count) = cli.result_count {
			self.search.result_count = Some(count);
		}
		if let Some(theme) = &cli.theme {
			self.ui.theme = Some(theme.clone());
		}
		if let Some(view) = cli.view {
			self.ui.start_view = Some(view.as_str().to_string());
		}
		if let Some(root) = &cli.root {
			self.picker.root = Some(root.clone());
		}
		if let Some(hidden) = cli.hidden {
			self.picker.include_hidden = Some(hidden);
		}
		if let Some(depth) = cli.max_depth {
			self.picker.max_depth = Some(depth);
		}
		if let Some(level) = &cli.log_level {
			self.logging.level = Some(level.clone());
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			backend_url: detect_source(
				cli.backend_url.is_some(),
				self.backend.url.is_some(),
				"RAGDECK__BACKEND__URL",
				"--backend-url",
				"backend.url",
			),
			theme: detect_source(
				cli.theme.is_some(),
				self.ui.theme.is_some(),
				"RAGDECK__UI__THEME",
				"--theme",
				"ui.theme",
			),
			start_view: detect_source(
				cli.view.is_some(),
				self.ui.start_view.is_some(),
				"RAGDECK__UI__START_VIEW",
				"--view",
				"ui.start_view",
			),
			picker_max_depth: detect_source(
				cli.max_depth.is_some(),
				self.picker.max_depth.is_some(),
				"RAGDECK__PICKER__MAX_DEPTH",
				"--max-depth",
				"picker.max_depth",
			),
		};

		let url = self
			.backend
			.url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		let backend_url = parse_base_url(&url).map_err(|err| {
			let reason = match err {
				BackendError::InvalidUrl { reason, .. } => reason,
				other => other.to_string(),
			};
			ConfigError::invalid(
				"backend.url",
				url.clone(),
				sources.source_for("backend.url", &sources.backend_url),
				reason,
			)
		})?;

		let theme_name = self
			.ui
			.theme
			.unwrap_or_else(|| DEFAULT_THEME.to_string());
		let theme = theme::by_name(&theme_name).ok_or_else(|| {
			ConfigError::invalid(
				"ui.theme",
				theme_name.clone(),
				sources.source_for("ui.theme", &sources.theme),
				format!("expected one of: {}", theme::names().join(", ")),
			)
		})?;

		let start_view = match self.ui.start_view {
			None => View::default(),
			Some(name) => View::from_name(&name).ok_or_else(|| {
				ConfigError::invalid(
					"ui.start_view",
					name.clone(),
					sources.source_for("ui.start_view", &sources.start_view),
					"expected one of: upload, search, documents",
				)
			})?,
		};

		let defaults = PickerOptions::default();
		let picker = PickerOptions {
			root: self.picker.root.unwrap_or(defaults.root),
			include_hidden: self.picker.include_hidden.unwrap_or(defaults.include_hidden),
			max_depth: self.picker.max_depth.or(defaults.max_depth),
		};

		let config = ResolvedConfig {
			backend_url,
			result_count: self
				.search
				.result_count
				.map_or(ResultCount::DEFAULT, ResultCount::clamped),
			theme_name,
			theme,
			start_view,
			picker,
			log_level: self
				.logging
				.level
				.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
			log_file: self.logging.file,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
