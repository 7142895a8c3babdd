//! PDF file picker backing the upload view.
//!
//! Walks a root directory with the `ignore` crate (so `.gitignore` and
//! friends are honoured), keeps every PDF it finds, and lets the user mark
//! any number of them before handing the choice to the controller.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use ragdeck_backend::{FileHandle, has_pdf_extension};

/// Where and how deep the picker looks for PDFs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
	pub root: PathBuf,
	/// Include hidden files and directories.
	pub include_hidden: bool,
	/// Maximum directory traversal depth.
	pub max_depth: Option<usize>,
}

impl Default for PickerOptions {
	fn default() -> Self {
		Self {
			root: PathBuf::from("."),
			include_hidden: false,
			max_depth: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
	/// Path relative to the picker root, used for display.
	pub relative: String,
	pub handle: FileHandle,
}

#[derive(Debug, Default)]
pub struct FilePicker {
	options: PickerOptions,
	entries: Vec<PickerEntry>,
	cursor: usize,
	marked: BTreeSet<usize>,
	skipped: usize,
}

impl FilePicker {
	/// An empty picker for `options.root`; call [`rescan`](Self::rescan) to fill it.
	#[must_use]
	pub fn new(options: PickerOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// Scan `options.root` for PDFs.
	pub fn scan(options: PickerOptions) -> Result<Self> {
		let mut picker = Self::new(options);
		picker.rescan()?;
		Ok(picker)
	}

	/// Walk the root again, dropping marks and resetting the cursor.
	pub fn rescan(&mut self) -> Result<()> {
		let root = &self.options.root;
		if !root.is_dir() {
			anyhow::bail!("picker root {} is not a directory", root.display());
		}

		let mut entries = Vec::new();
		let mut skipped = 0;
		let walker = WalkBuilder::new(root)
			.hidden(!self.options.include_hidden)
			.follow_links(false)
			.parents(true)
			.max_depth(self.options.max_depth)
			.build();
		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					tracing::debug!(error = %err, "skipping unreadable entry");
					skipped += 1;
					continue;
				}
			};
			if !entry.file_type().is_some_and(|kind| kind.is_file()) {
				continue;
			}
			let path = entry.path();
			if !has_pdf_extension(path) {
				continue;
			}
			match FileHandle::from_path(path) {
				Ok(handle) => entries.push(PickerEntry {
					relative: relative_label(root, path),
					handle,
				}),
				Err(err) => {
					tracing::debug!(error = %err, "skipping unreadable file");
					skipped += 1;
				}
			}
		}
		entries.sort_by(|a, b| a.relative.cmp(&b.relative));

		tracing::debug!(
			root = %root.display(),
			found = entries.len(),
			skipped,
			"picker scanned"
		);
		self.entries = entries;
		self.skipped = skipped;
		self.cursor = 0;
		self.marked.clear();
		Ok(())
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.options.root
	}

	#[must_use]
	pub fn entries(&self) -> &[PickerEntry] {
		&self.entries
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Number of entries the last scan could not read.
	#[must_use]
	pub fn skipped(&self) -> usize {
		self.skipped
	}

	#[must_use]
	pub fn is_marked(&self, index: usize) -> bool {
		self.marked.contains(&index)
	}

	#[must_use]
	pub fn marked_count(&self) -> usize {
		self.marked.len()
	}

	/// Move the cursor by `delta`, clamped to the list bounds.
	pub fn move_cursor(&mut self, delta: isize) {
		if self.entries.is_empty() {
			return;
		}
		let last = self.entries.len() - 1;
		self.cursor = self.cursor.saturating_add_signed(delta).min(last);
	}

	/// Mark or unmark the entry under the cursor.
	pub fn toggle(&mut self) {
		if self.entries.is_empty() {
			return;
		}
		if !self.marked.remove(&self.cursor) {
			self.marked.insert(self.cursor);
		}
	}

	pub fn toggle_all(&mut self) {
		if self.marked.len() == self.entries.len() {
			self.marked.clear();
		} else {
			self.marked = (0..self.entries.len()).collect();
		}
	}

	pub fn clear_marks(&mut self) {
		self.marked.clear();
	}

	/// Files to hand to the controller: every marked entry in list order, or
	/// the entry under the cursor when nothing is marked.
	#[must_use]
	pub fn selection(&self) -> Vec<FileHandle> {
		if self.marked.is_empty() {
			return self
				.entries
				.get(self.cursor)
				.map(|entry| vec![entry.handle.clone()])
				.unwrap_or_default();
		}
		self.marked
			.iter()
			.filter_map(|&index| self.entries.get(index))
			.map(|entry| entry.handle.clone())
			.collect()
	}
}

fn relative_label(root: &Path, path: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.to_string_lossy()
		.into_owned()
}

/// Turn explicit command-line paths into handles, rejecting anything that is
/// not a readable PDF.
pub fn handles_from_paths(paths: &[PathBuf]) -> Result<Vec<FileHandle>> {
	paths
		.iter()
		.map(|path| {
			if !has_pdf_extension(path) {
				anyhow::bail!("{} is not a PDF", path.display());
			}
			FileHandle::from_path(path).with_context(|| format!("cannot upload {}", path.display()))
		})
		.collect()
}
