use std::fmt::Write;

use anyhow::Result;
use ragdeck::presentation::{DocumentView, format_size};
use ragdeck_backend::{
	Document, FileHandle, HealthStatus, IndexReceipt, ResultCount, SearchResults,
};
use serde::Serialize;

/// Result of one headless command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub(crate) enum Report {
	Upload {
		files: Vec<FileHandle>,
		receipt: Option<IndexReceipt>,
	},
	Search {
		query: String,
		result_count: ResultCount,
		results: SearchResults,
	},
	Documents {
		documents: Vec<Document>,
	},
	Health {
		backend: String,
		status: HealthStatus,
	},
}

pub(crate) fn format_plain(report: &Report) -> String {
	let mut out = String::new();
	match report {
		Report::Upload { files, receipt } => {
			let total: u64 = files.iter().map(|file| file.size).sum();
			let _ = writeln!(
				out,
				"Uploaded {} file(s), {}",
				files.len(),
				format_size(total)
			);
			for file in files {
				let _ = writeln!(out, "  {} ({})", file.name, format_size(file.size));
			}
			if let Some(receipt) = receipt {
				if !receipt.message.is_empty() {
					let _ = writeln!(out, "{}", receipt.message);
				}
				if let Some(count) = receipt.document_count {
					let _ = writeln!(out, "Documents in index: {count}");
				}
			}
		}
		Report::Search { results, .. } => match results {
			SearchResults::Answer(text) => {
				let _ = writeln!(out, "{text}");
			}
			SearchResults::Hits(hits) if hits.is_empty() => {
				let _ = writeln!(out, "No results");
			}
			SearchResults::Hits(hits) => {
				for (index, hit) in hits.iter().enumerate() {
					let mut heading = format!("{}.", index + 1);
					if let Some(source) = &hit.source {
						let _ = write!(heading, " {source}");
					}
					if let Some(page) = hit.page {
						let _ = write!(heading, " (page {page})");
					}
					if let Some(score) = hit.score {
						let _ = write!(heading, " score {score:.2}");
					}
					let _ = writeln!(out, "{heading}\n{}\n", hit.text);
				}
			}
		},
		Report::Documents { documents } if documents.is_empty() => {
			let _ = writeln!(out, "No documents indexed");
		}
		Report::Documents { documents } => {
			for document in documents {
				let view = DocumentView::from(document);
				let _ = writeln!(out, "{}", view.title);
				for panel in &view.panels {
					for field in &panel.fields {
						let _ = writeln!(out, "  {:<9}{}", field.label, field.value);
					}
				}
				out.push('\n');
			}
		}
		Report::Health { backend, status } => {
			let _ = writeln!(out, "{backend}: {}", status.status);
		}
	}
	out
}

pub(crate) fn print_plain(report: &Report) {
	print!("{}", format_plain(report));
}

pub(crate) fn format_json(report: &Report) -> Result<String> {
	Ok(serde_json::to_string_pretty(report)?)
}

pub(crate) fn print_json(report: &Report) -> Result<()> {
	println!("{}", format_json(report)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use ragdeck_backend::{SearchHit, TextChunk};
	use serde_json::Value;

	use super::*;

	fn document() -> Document {
		Document {
			filename: "report.pdf".into(),
			file_size: 2048,
			file_type: "application/pdf".into(),
			pages: vec![1, 2],
			created_at: "2024-05-01T09:30:00Z".into(),
			modified_at: "not recorded".into(),
			storage_path: "/srv/rag/report.pdf".into(),
			chunks: vec![TextChunk {
				page: 1,
				text: "Executive summary".into(),
			}],
		}
	}

	#[test]
	fn upload_lists_files_and_receipt() {
		let report = Report::Upload {
			files: vec![FileHandle::new("report.pdf", 2048, "/tmp/report.pdf")],
			receipt: Some(IndexReceipt {
				success: true,
				message: "Documents processed and indexed successfully".into(),
				document_count: Some(4),
			}),
		};
		assert_eq!(
			format_plain(&report),
			"Uploaded 1 file(s), 2.0 KiB\n  report.pdf (2.0 KiB)\n\
			 Documents processed and indexed successfully\nDocuments in index: 4\n"
		);
	}

	#[test]
	fn hits_are_numbered_with_their_metadata() {
		let report = Report::Search {
			query: "rust".into(),
			result_count: ResultCount::DEFAULT,
			results: SearchResults::Hits(vec![SearchHit {
				text: "ownership".into(),
				score: Some(0.5),
				page: Some(3),
				source: Some("book.pdf".into()),
			}]),
		};
		assert_eq!(
			format_plain(&report),
			"1. book.pdf (page 3) score 0.50\nownership\n\n"
		);
	}

	#[test]
	fn documents_print_their_panels() {
		let text = format_plain(&Report::Documents {
			documents: vec![document()],
		});
		assert!(text.starts_with("report.pdf\n"));
		assert!(text.contains("  Size     2.0 KiB\n"));
		assert!(text.contains("  Created  2024-05-01 09:30 UTC\n"));
		assert!(text.contains("  Modified not recorded\n"));
		assert!(text.contains("  Path     /srv/rag/report.pdf\n"));
	}

	#[test]
	fn json_is_tagged_by_command() {
		let report = Report::Search {
			query: "neural networks".into(),
			result_count: ResultCount::clamped(10),
			results: SearchResults::Answer("Result text...".into()),
		};
		let value: Value = serde_json::from_str(&format_json(&report).unwrap()).unwrap();
		assert_eq!(value["command"], "search");
		assert_eq!(value["result_count"], 10);
		assert_eq!(value["results"], "Result text...");
	}
}
