use ragdeck::app_dirs;

use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	let mut lines = vec![
		"Effective configuration:".to_string(),
		format!("  Backend URL: {}", config.backend_url),
		format!("  Result count: {}", config.result_count),
		format!("  UI theme: {}", config.theme_name),
		format!("  Start view: {}", config.start_view),
		format!("  Picker root: {}", config.picker.root.display()),
		format!(
			"  Include hidden: {}",
			bool_to_word(config.picker.include_hidden)
		),
	];
	lines.push(match config.picker.max_depth {
		Some(depth) => format!("  Max depth: {depth}"),
		None => "  Max depth: unlimited".to_string(),
	});
	lines.push(format!("  Log level: {}", config.log_level));
	lines.push(match &config.log_file {
		Some(path) => format!("  Log file: {}", path.display()),
		None => "  Log file: (data directory)".to_string(),
	});
	for (label, dir) in [
		("Config directory", app_dirs::get_config_dir()),
		("Data directory", app_dirs::get_data_dir()),
		("Cache directory", app_dirs::get_cache_dir()),
	] {
		lines.push(match dir {
			Ok(path) => format!("  {label}: {}", path.display()),
			Err(err) => format!("  {label}: unavailable ({err})"),
		});
	}
	lines
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
