mod cli;
mod settings;
mod workflow;

use anyhow::{Context, Result};
use ragdeck::app_dirs;
use ragdeck::logging::{self, LogTarget};
use ragdeck::ui::theme;

use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::Workflow;

const LOG_FILE_NAME: &str = "ragdeck.log";

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let target = log_target(&resolved, cli.action.is_some())?;
	logging::initialize(&resolved.log_level, &target)?;

	let workflow = Workflow::from_config(resolved)?;
	match cli.action {
		None => workflow.run_panel(),
		Some(action) => {
			let report = workflow.run_action(action)?;
			match cli.output {
				OutputFormat::Plain => print_plain(&report),
				OutputFormat::Json => print_json(&report)?,
			}
			Ok(())
		}
	}
}

/// Headless commands log to stderr; the panel owns the terminal and logs to a file.
fn log_target(config: &ResolvedConfig, headless: bool) -> Result<LogTarget> {
	if headless {
		return Ok(LogTarget::Stderr);
	}
	match &config.log_file {
		Some(path) => Ok(LogTarget::File(path.clone())),
		None => {
			let dir = app_dirs::get_data_dir().context("no location for the log file")?;
			Ok(LogTarget::File(dir.join(LOG_FILE_NAME)))
		}
	}
}
