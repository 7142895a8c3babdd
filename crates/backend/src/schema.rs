//! Wire types exchanged with the backend.
//!
//! Response shapes are validated at the boundary: anything that does not
//! deserialize into these types is reported as a malformed response rather
//! than propagated as loosely typed JSON.

use serde::{Deserialize, Serialize};

/// Number of hits requested from a search, clamped to `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResultCount(u8);

impl ResultCount {
	pub const MIN: u8 = 1;
	pub const MAX: u8 = 20;
	pub const DEFAULT: Self = Self(5);

	/// Clamp an arbitrary requested count into the accepted range.
	#[must_use]
	pub fn clamped(requested: i64) -> Self {
		let value = requested.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
		Self(value as u8)
	}

	#[must_use]
	pub fn get(self) -> u8 {
		self.0
	}

	/// Step the count by `delta`, saturating at the range bounds.
	#[must_use]
	pub fn step(self, delta: i64) -> Self {
		Self::clamped(i64::from(self.0) + delta)
	}
}

impl Default for ResultCount {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl<'de> Deserialize<'de> for ResultCount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let requested = i64::deserialize(deserializer)?;
		Ok(Self::clamped(requested))
	}
}

impl std::fmt::Display for ResultCount {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A search the controller is allowed to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
	query: String,
	limit: ResultCount,
}

impl SearchRequest {
	/// Build a request, refusing queries that are empty after trimming.
	#[must_use]
	pub fn new(query: impl Into<String>, limit: ResultCount) -> Option<Self> {
		let query = query.into();
		if query.trim().is_empty() {
			return None;
		}
		Some(Self { query, limit })
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn limit(&self) -> ResultCount {
		self.limit
	}
}

/// One structured hit returned by backends that expose their retrieval list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
	pub text: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub score: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
}

/// The `response` payload of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResults {
	/// A single generated answer rendered as one text block.
	Answer(String),
	/// A list of retrieved passages.
	Hits(Vec<SearchHit>),
}

impl SearchResults {
	/// Number of blocks the results render as.
	#[must_use]
	pub fn len(&self) -> usize {
		match self {
			Self::Answer(_) => 1,
			Self::Hits(hits) => hits.len(),
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Answer(text) => text.is_empty(),
			Self::Hits(hits) => hits.is_empty(),
		}
	}

	/// The generated answer, when the backend returned plain text.
	#[must_use]
	pub fn as_answer(&self) -> Option<&str> {
		match self {
			Self::Answer(text) => Some(text),
			Self::Hits(_) => None,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
	pub(crate) response: SearchResults,
}

/// Summary returned by the indexing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReceipt {
	pub success: bool,
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub document_count: Option<u64>,
}

/// Liveness report from the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
	pub status: String,
}

impl HealthStatus {
	#[must_use]
	pub fn is_healthy(&self) -> bool {
		self.status.eq_ignore_ascii_case("healthy")
	}
}

/// A page-tagged excerpt of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
	pub page: u32,
	pub text: String,
}

/// An indexed document as described by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
	#[serde(alias = "file_name")]
	pub filename: String,
	pub file_size: u64,
	pub file_type: String,
	pub pages: Vec<u32>,
	#[serde(alias = "creation_date")]
	pub created_at: String,
	#[serde(alias = "last_modified_date")]
	pub modified_at: String,
	#[serde(alias = "file_path")]
	pub storage_path: String,
	pub chunks: Vec<TextChunk>,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn result_count_clamps_and_is_idempotent() {
		assert_eq!(ResultCount::clamped(0).get(), 1);
		assert_eq!(ResultCount::clamped(-40).get(), 1);
		assert_eq!(ResultCount::clamped(10).get(), 10);
		assert_eq!(ResultCount::clamped(99).get(), 20);
		for requested in [-5, 0, 1, 7, 20, 21, 500] {
			let once = ResultCount::clamped(requested);
			let twice = ResultCount::clamped(i64::from(once.get()));
			assert_eq!(once, twice);
		}
	}

	#[test]
	fn result_count_step_saturates() {
		assert_eq!(ResultCount::clamped(20).step(1).get(), 20);
		assert_eq!(ResultCount::clamped(1).step(-1).get(), 1);
		assert_eq!(ResultCount::DEFAULT.step(3).get(), 8);
	}

	#[test]
	fn result_count_deserializes_clamped() {
		let count: ResultCount = serde_json::from_value(json!(42)).expect("count");
		assert_eq!(count.get(), 20);
	}

	#[test]
	fn whitespace_queries_are_rejected() {
		assert!(SearchRequest::new("   \t", ResultCount::DEFAULT).is_none());
		let request = SearchRequest::new(" rust ", ResultCount::DEFAULT).expect("request");
		assert_eq!(request.query(), " rust ");
	}

	#[test]
	fn search_payload_accepts_text_and_hit_lists() {
		let text: SearchEnvelope =
			serde_json::from_value(json!({ "response": "Result text..." })).expect("text");
		assert_eq!(text.response.as_answer(), Some("Result text..."));

		let hits: SearchEnvelope = serde_json::from_value(json!({
			"response": [
				{ "text": "first", "score": 0.9, "page": 2 },
				{ "text": "second" }
			]
		}))
		.expect("hits");
		assert_eq!(hits.response.len(), 2);
		assert!(hits.response.as_answer().is_none());
	}

	#[test]
	fn search_payload_rejects_other_shapes() {
		assert!(serde_json::from_value::<SearchEnvelope>(json!({ "response": 12 })).is_err());
		assert!(serde_json::from_value::<SearchEnvelope>(json!({ "answer": "x" })).is_err());
	}

	#[test]
	fn document_accepts_loader_metadata_names() {
		let document: Document = serde_json::from_value(json!({
			"file_name": "report.pdf",
			"file_size": 2048,
			"file_type": "application/pdf",
			"pages": [1, 2],
			"creation_date": "2024-03-01",
			"last_modified_date": "2024-03-02",
			"file_path": "/data/report.pdf",
			"chunks": [{ "page": 1, "text": "intro" }]
		}))
		.expect("document");
		assert_eq!(document.filename, "report.pdf");
		assert_eq!(document.storage_path, "/data/report.pdf");
		assert_eq!(document.chunks[0].page, 1);
	}
}
