//! Read-only view model for one indexed document.
//!
//! [`DocumentView`] groups the attributes of a [`Document`] into labelled
//! panels and turns its text chunks into page blocks. Nothing here touches
//! the network or mutates the record it was built from.

use chrono::{DateTime, Utc};
use ragdeck_backend::Document;
use serde::Serialize;

pub const FILE_DETAILS: &str = "File details";
pub const DATES: &str = "Dates";
pub const STORAGE: &str = "Storage";

/// One labelled value inside a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
	pub label: &'static str,
	pub value: String,
}

impl Field {
	fn new(label: &'static str, value: impl Into<String>) -> Self {
		Self {
			label,
			value: value.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
	pub title: &'static str,
	pub fields: Vec<Field>,
}

/// Text of one chunk, headed by the page it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageBlock {
	pub heading: String,
	pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentView {
	pub title: String,
	pub panels: [Panel; 3],
	pub pages: Vec<PageBlock>,
}

impl From<&Document> for DocumentView {
	fn from(document: &Document) -> Self {
		let details = Panel {
			title: FILE_DETAILS,
			fields: vec![
				Field::new("Name", document.filename.as_str()),
				Field::new("Size", format_size(document.file_size)),
				Field::new("Type", document.file_type.as_str()),
				Field::new("Pages", document.pages.len().to_string()),
			],
		};
		let dates = Panel {
			title: DATES,
			fields: vec![
				Field::new("Created", format_timestamp(&document.created_at)),
				Field::new("Modified", format_timestamp(&document.modified_at)),
			],
		};
		let storage = Panel {
			title: STORAGE,
			fields: vec![Field::new("Path", document.storage_path.as_str())],
		};
		let pages = document
			.chunks
			.iter()
			.map(|chunk| PageBlock {
				heading: format!("Page {}", chunk.page),
				text: chunk.text.clone(),
			})
			.collect();

		Self {
			title: document.filename.clone(),
			panels: [details, dates, storage],
			pages,
		}
	}
}

impl DocumentView {
	#[must_use]
	pub fn panel(&self, title: &str) -> Option<&Panel> {
		self.panels.iter().find(|panel| panel.title == title)
	}
}

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Render a byte count with binary units and one decimal above bytes.
#[must_use]
pub fn format_size(bytes: u64) -> String {
	if bytes < 1024 {
		return format!("{bytes} B");
	}
	let mut value = bytes as f64;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	format!("{value:.1} {}", UNITS[unit])
}

/// RFC 3339 timestamps become `YYYY-MM-DD HH:MM UTC`; anything else is shown as is.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
	match DateTime::parse_from_rfc3339(raw.trim()) {
		Ok(parsed) => parsed
			.with_timezone(&Utc)
			.format("%Y-%m-%d %H:%M UTC")
			.to_string(),
		Err(_) => raw.to_string(),
	}
}
