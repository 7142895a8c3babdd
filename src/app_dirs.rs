//! Locations of ragdeck's configuration, data, and cache directories.
//!
//! Each directory can be pinned with an environment variable. Without one,
//! the per-user platform location from the `directories` crate is used.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

pub const CONFIG_DIR_ENV: &str = "RAGDECK_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "RAGDECK_DATA_DIR";
pub const CACHE_DIR_ENV: &str = "RAGDECK_CACHE_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppDir {
	Config,
	Data,
	Cache,
}

impl AppDir {
	fn override_var(self) -> &'static str {
		match self {
			Self::Config => CONFIG_DIR_ENV,
			Self::Data => DATA_DIR_ENV,
			Self::Cache => CACHE_DIR_ENV,
		}
	}

	fn platform_dir(self, dirs: &ProjectDirs) -> PathBuf {
		match self {
			Self::Config => dirs.config_local_dir(),
			Self::Data => dirs.data_local_dir(),
			Self::Cache => dirs.cache_dir(),
		}
		.to_path_buf()
	}
}

/// Pick the override when it holds a usable path, otherwise the platform directory.
///
/// A value that is empty or only whitespace counts as unset, so an exported
/// but blank variable falls back to the platform default instead of
/// resolving to the working directory.
fn resolve(dir: AppDir, override_value: Option<OsString>) -> Result<PathBuf> {
	if let Some(value) = override_value
		&& !value.to_string_lossy().trim().is_empty()
	{
		return Ok(PathBuf::from(value));
	}
	let dirs = ProjectDirs::from("io", "ragdeck", "ragdeck")
		.ok_or_else(|| anyhow!("no home directory to place the ragdeck {dir:?} directory in"))?;
	Ok(dir.platform_dir(&dirs))
}

fn lookup(dir: AppDir) -> Result<PathBuf> {
	resolve(dir, env::var_os(dir.override_var()))
}

/// Directory searched for `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	lookup(AppDir::Config)
}

/// Directory holding the interactive panel's log file.
pub fn get_data_dir() -> Result<PathBuf> {
	lookup(AppDir::Data)
}

pub fn get_cache_dir() -> Result<PathBuf> {
	lookup(AppDir::Cache)
}
