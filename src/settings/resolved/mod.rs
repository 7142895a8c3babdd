use std::path::PathBuf;

use ragdeck::{PickerOptions, Theme, View};
use ragdeck_backend::{ResultCount, Url};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub backend_url: Url,
	pub result_count: ResultCount,
	pub theme_name: String,
	pub theme: Theme,
	pub start_view: View,
	pub picker: PickerOptions,
	pub log_level: String,
	/// Log file for the interactive panel; `None` means the data directory default.
	pub log_file: Option<PathBuf>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
