//! Plain state types owned by the [`Controller`](super::Controller).

use std::fmt;

use chrono::{DateTime, Utc};
use ragdeck_backend::FileHandle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three mutually exclusive panel views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
	#[default]
	Upload,
	Search,
	Documents,
}

impl View {
	pub const ALL: [View; 3] = [View::Upload, View::Search, View::Documents];

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Upload => "upload",
			Self::Search => "search",
			Self::Documents => "documents",
		}
	}

	/// Parse a view name as written in configuration files.
	#[must_use]
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|view| view.as_str().eq_ignore_ascii_case(name.trim()))
	}

	#[must_use]
	pub fn index(self) -> usize {
		match self {
			Self::Upload => 0,
			Self::Search => 1,
			Self::Documents => 2,
		}
	}

	#[must_use]
	pub fn next(self) -> Self {
		Self::ALL[(self.index() + 1) % Self::ALL.len()]
	}

	#[must_use]
	pub fn previous(self) -> Self {
		Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
	}
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The kinds of request the controller can have in flight, one of each at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
	Upload,
	Search,
	Documents,
	Health,
}

impl OperationKind {
	pub const ALL: [OperationKind; 4] = [
		OperationKind::Upload,
		OperationKind::Search,
		OperationKind::Documents,
		OperationKind::Health,
	];

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Upload => "upload",
			Self::Search => "search",
			Self::Documents => "documents",
			Self::Health => "health",
		}
	}
}

impl fmt::Display for OperationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Ordered files chosen for the next upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
	files: Vec<FileHandle>,
}

impl SelectionSet {
	/// Replace the whole selection; previous entries are discarded.
	pub fn replace(&mut self, files: impl IntoIterator<Item = FileHandle>) {
		self.files = files.into_iter().collect();
	}

	pub fn clear(&mut self) {
		self.files.clear();
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.files.len()
	}

	#[must_use]
	pub fn files(&self) -> &[FileHandle] {
		&self.files
	}

	pub fn iter(&self) -> impl Iterator<Item = &FileHandle> {
		self.files.iter()
	}

	#[must_use]
	pub fn total_bytes(&self) -> u64 {
		self.files.iter().map(|file| file.size).sum()
	}
}

/// Pending flag and last failure for one operation kind.
#[derive(Debug, Clone, Default)]
pub(crate) struct OperationState {
	pending: bool,
	last_error: Option<String>,
}

impl OperationState {
	pub(crate) fn is_pending(&self) -> bool {
		self.pending
	}

	pub(crate) fn last_error(&self) -> Option<&str> {
		self.last_error.as_deref()
	}

	pub(crate) fn begin(&mut self) {
		self.pending = true;
	}

	pub(crate) fn succeed(&mut self) {
		self.pending = false;
		self.last_error = None;
	}

	pub(crate) fn fail(&mut self, message: String) {
		self.pending = false;
		self.last_error = Some(message);
	}
}

/// Record of a failed operation kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	pub kind: OperationKind,
	pub message: String,
	pub at: DateTime<Utc>,
}

/// Outcome of asking the controller to start an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
	/// The request was handed to the runtime; its pending flag is now set.
	Dispatched,
	/// A precondition failed; nothing was sent.
	Blocked(Blocked),
}

impl Submission {
	#[must_use]
	pub fn is_dispatched(self) -> bool {
		matches!(self, Self::Dispatched)
	}
}

/// Why a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Blocked {
	#[error("no files are selected")]
	NothingSelected,
	#[error("the query is empty")]
	EmptyQuery,
	#[error("{0} request already pending")]
	Pending(OperationKind),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn views_cycle_in_both_directions() {
		assert_eq!(View::Upload.next(), View::Search);
		assert_eq!(View::Documents.next(), View::Upload);
		assert_eq!(View::Upload.previous(), View::Documents);
		for view in View::ALL {
			assert_eq!(view.next().previous(), view);
		}
	}

	#[test]
	fn view_names_parse_case_insensitively() {
		assert_eq!(View::from_name(" Documents "), Some(View::Documents));
		assert_eq!(View::from_name("bogus"), None);
	}

	#[test]
	fn selection_replace_discards_previous_entries() {
		let mut selection = SelectionSet::default();
		selection.replace([FileHandle::new("a.pdf", 1, "a.pdf")]);
		selection.replace([
			FileHandle::new("b.pdf", 2, "b.pdf"),
			FileHandle::new("c.pdf", 3, "c.pdf"),
		]);
		let names: Vec<_> = selection.iter().map(|file| file.name.as_str()).collect();
		assert_eq!(names, ["b.pdf", "c.pdf"]);
		assert_eq!(selection.total_bytes(), 5);
	}

	#[test]
	fn blocked_reasons_read_naturally() {
		assert_eq!(
			Blocked::Pending(OperationKind::Upload).to_string(),
			"upload request already pending"
		);
	}
}
