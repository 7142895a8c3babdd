use std::fmt;

/// Where a setting's effective value came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origins of the settings that can fail validation. `None` means the default was used.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) backend_url: Option<SettingSource>,
	pub(crate) theme: Option<SettingSource>,
	pub(crate) start_view: Option<SettingSource>,
	pub(crate) picker_max_depth: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for(
		&self,
		key: &'static str,
		detected: &Option<SettingSource>,
	) -> SettingSource {
		detected.clone().unwrap_or(SettingSource::ConfigKey(key))
	}

	pub(crate) fn source_for_max_depth(&self) -> SettingSource {
		self.source_for("picker.max_depth", &self.picker_max_depth)
	}
}
