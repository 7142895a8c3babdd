use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::BackendError;

/// A local file chosen for upload.
///
/// Only the name and size are captured when the handle is created; the bytes
/// are read when the upload is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHandle {
	pub name: String,
	pub size: u64,
	pub path: PathBuf,
}

impl FileHandle {
	pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
		Self {
			name: name.into(),
			size,
			path: path.into(),
		}
	}

	/// Stat `path` and build a handle named after its final component.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BackendError> {
		let path = path.as_ref();
		let metadata = std::fs::metadata(path).map_err(|source| BackendError::ReadFile {
			path: path.to_path_buf(),
			source,
		})?;
		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| path.display().to_string());
		Ok(Self::new(name, metadata.len(), path))
	}

	/// True when the file carries a `.pdf` extension, ignoring case.
	#[must_use]
	pub fn is_pdf(&self) -> bool {
		has_pdf_extension(&self.path) || has_pdf_extension(Path::new(&self.name))
	}

	pub(crate) async fn read(&self) -> Result<Vec<u8>, BackendError> {
		tokio::fs::read(&self.path)
			.await
			.map_err(|source| BackendError::ReadFile {
				path: self.path.clone(),
				source,
			})
	}
}

/// True when `path` ends in `.pdf`, ignoring case.
#[must_use]
pub fn has_pdf_extension(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
