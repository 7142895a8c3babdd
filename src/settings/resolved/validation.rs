use super::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if let Some(max_depth) = config.picker.max_depth
		&& max_depth == 0
	{
		return Err(ConfigError::invalid(
			"picker.max_depth",
			max_depth.to_string(),
			sources.source_for_max_depth(),
			"must be at least 1",
		));
	}

	if config.log_level.trim().is_empty() {
		return Err(ConfigError::invalid(
			"logging.level",
			config.log_level.clone(),
			SettingSource::ConfigKey("logging.level"),
			"must not be empty",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use ragdeck::PickerOptions;
	use ragdeck_backend::{DEFAULT_BASE_URL, ResultCount, parse_base_url};

	use super::*;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			backend_url: parse_base_url(DEFAULT_BASE_URL).unwrap(),
			result_count: ResultCount::DEFAULT,
			theme_name: "slate".into(),
			theme: ragdeck::Theme::default(),
			start_view: ragdeck::View::Upload,
			picker: PickerOptions::default(),
			log_level: "info".into(),
			log_file: None,
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&config(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_max_depth() {
		let mut config = config();
		config.picker.max_depth = Some(0);
		let sources = ConfigSources {
			picker_max_depth: Some(SettingSource::Environment("RAGDECK__PICKER__MAX_DEPTH")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "picker.max_depth");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("environment variable"));
	}

	#[test]
	fn validation_rejects_blank_log_level() {
		let mut config = config();
		config.log_level = "  ".into();
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "logging.level");
	}
}
