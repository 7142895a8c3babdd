use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use ragdeck::View;
use tempfile::TempDir;

use super::RawConfig;
use crate::cli::CliArgs;
use crate::settings::load;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, contents).unwrap();
	path
}

fn cli(configs: &[&Path], extra: &[&str]) -> CliArgs {
	let mut args = vec!["ragdeck".to_string(), "--no-config".to_string()];
	for path in configs {
		args.push("--config".into());
		args.push(path.display().to_string());
	}
	args.extend(extra.iter().map(|arg| (*arg).to_string()));
	CliArgs::parse_from(args)
}

#[test]
fn cli_overrides_take_precedence() {
	let cli = CliArgs::parse_from([
		"ragdeck",
		"--backend-url",
		"http://rag:9000",
		"--theme",
		"light",
		"--view",
		"search",
		"-k",
		"7",
		"--root",
		"/tmp",
		"--hidden",
		"--max-depth",
		"2",
		"--log-level",
		"debug",
	]);

	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);

	assert_eq!(config.backend.url.as_deref(), Some("http://rag:9000"));
	assert_eq!(config.search.result_count, Some(7));
	assert_eq!(config.ui.theme.as_deref(), Some("light"));
	assert_eq!(config.ui.start_view.as_deref(), Some("search"));
	assert_eq!(config.picker.root, Some(PathBuf::from("/tmp")));
	assert_eq!(config.picker.include_hidden, Some(true));
	assert_eq!(config.picker.max_depth, Some(2));
	assert_eq!(config.logging.level.as_deref(), Some("debug"));
}

#[test]
fn later_files_override_earlier_ones_and_flags_override_both() {
	let dir = TempDir::new().unwrap();
	let base = write(
		&dir,
		"base.toml",
		r#"
[backend]
url = "http://base:1"

[search]
result_count = 3

[ui]
theme = "light"
start_view = "documents"

[picker]
max_depth = 4
"#,
	);
	let local = write(
		&dir,
		"local.toml",
		r#"
[search]
result_count = 50

[logging]
level = "warn"
file = "/var/log/ragdeck.log"
"#,
	);

	let resolved = load(&cli(&[&base, &local], &["--theme", "slate"])).unwrap();

	assert_eq!(resolved.backend_url.as_str(), "http://base:1/");
	assert_eq!(resolved.result_count.get(), 20);
	assert_eq!(resolved.theme_name, "slate");
	assert_eq!(resolved.start_view, View::Documents);
	assert_eq!(resolved.picker.max_depth, Some(4));
	assert_eq!(resolved.log_level, "warn");
	assert_eq!(resolved.log_file, Some(PathBuf::from("/var/log/ragdeck.log")));
}

#[test]
fn defaults_apply_without_any_source() {
	let resolved = load(&cli(&[], &[])).unwrap();
	assert_eq!(resolved.result_count.get(), 5);
	assert_eq!(resolved.theme_name, "slate");
	assert_eq!(resolved.start_view, View::Upload);
	assert_eq!(resolved.picker.root, PathBuf::from("."));
	assert!(!resolved.picker.include_hidden);
	assert_eq!(resolved.log_level, "info");
}

#[test]
fn unknown_theme_names_its_config_key() {
	let dir = TempDir::new().unwrap();
	let path = write(&dir, "theme.toml", "[ui]\ntheme = \"neon\"\n");
	let err = load(&cli(&[&path], &[])).unwrap_err().to_string();
	assert!(err.contains("ui.theme"), "{err}");
	assert!(err.contains("configuration key `ui.theme`"), "{err}");
	assert!(err.contains("expected one of: slate, light"), "{err}");
}

#[test]
fn bad_url_names_the_cli_flag() {
	let err = load(&cli(&[], &["--backend-url", "ftp://rag"]))
		.unwrap_err()
		.to_string();
	assert!(err.contains("CLI flag `--backend-url`"), "{err}");
	assert!(err.contains("unsupported scheme 'ftp'"), "{err}");
}

#[test]
fn unknown_start_view_is_rejected() {
	let dir = TempDir::new().unwrap();
	let path = write(&dir, "view.toml", "[ui]\nstart_view = \"settings\"\n");
	let err = load(&cli(&[&path], &[])).unwrap_err().to_string();
	assert!(err.contains("ui.start_view"), "{err}");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
	let dir = TempDir::new().unwrap();
	let missing = dir.path().join("absent.toml");
	assert!(load(&cli(&[&missing], &[])).is_err());
}
