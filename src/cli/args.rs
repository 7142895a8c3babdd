use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};
use ragdeck::View;
use ragdeck::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let cache_dir = match app_dirs::get_cache_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("ragdeck {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");
	let _ = writeln!(details, "cache directory: {cache_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "ragdeck",
	version,
	long_version = long_version(),
	about = "Upload PDFs to a RAG backend, search them, and browse what is indexed",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "RAGDECK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "backend-url",
		value_name = "URL",
		env = "RAGDECK_BACKEND_URL",
		global = true,
		help = "Base URL of the RAG backend (default: http://localhost:53232)"
	)]
	pub(crate) backend_url: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long,
		value_enum,
		help = "Choose the view shown at startup (default: upload)"
	)]
	pub(crate) view: Option<ViewArg>,
	#[arg(
		short = 'k',
		long = "result-count",
		value_name = "N",
		global = true,
		allow_negative_numbers = true,
		help = "Number of search results to request, clamped to 1..=20 (default: 5)"
	)]
	pub(crate) result_count: Option<i64>,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Directory the file picker scans for PDFs (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'H',
		long = "hidden",
		value_parser = BoolishValueParser::new(),
		num_args = 0..=1,
		require_equals = true,
		default_missing_value = "true",
		help = "Include hidden files in the picker (default: disabled)"
	)]
	pub(crate) hidden: Option<bool>,
	#[arg(
		short = 'd',
		long = "max-depth",
		value_name = "NUM",
		help = "Limit picker directory depth (default: unlimited)"
	)]
	pub(crate) max_depth: Option<usize>,
	#[arg(
		long = "log-level",
		value_name = "LEVEL",
		global = true,
		help = "Log filter directive, overridden by RAGDECK_LOG (default: info)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		global = true,
		default_value_t = OutputFormat::Plain,
		help = "Choose how headless commands print their result"
	)]
	pub(crate) output: OutputFormat,
	#[command(subcommand)]
	pub(crate) action: Option<Action>,
}

/// Headless operations. Without one the interactive panel starts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
	/// Upload PDF files for indexing.
	Upload {
		#[arg(value_name = "FILES", required = true)]
		files: Vec<PathBuf>,
	},
	/// Ask the backend a question.
	Search {
		#[arg(value_name = "QUERY")]
		query: String,
	},
	/// List the documents the backend has indexed.
	Documents,
	/// Check that the backend is reachable.
	Health,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ViewArg {
	Upload,
	Search,
	Documents,
}

impl ViewArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			ViewArg::Upload => View::Upload.as_str(),
			ViewArg::Search => View::Search.as_str(),
			ViewArg::Documents => View::Documents.as_str(),
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
