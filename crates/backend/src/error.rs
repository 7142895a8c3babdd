use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by a [`Backend`](crate::Backend) call.
///
/// Every variant is recoverable from the caller's point of view: the request
/// either never left the client, or the backend answered with something the
/// client could not use.
#[derive(Debug, Error)]
pub enum BackendError {
	/// The request could not be sent or the connection dropped mid-flight.
	#[error("request to {endpoint} failed: {source}")]
	Transport {
		endpoint: &'static str,
		#[source]
		source: reqwest::Error,
	},

	/// The backend answered with a non-success status code.
	#[error("{endpoint} returned {status}{}", detail_suffix(.body))]
	Status {
		endpoint: &'static str,
		status: StatusCode,
		body: String,
	},

	/// The backend answered 2xx but the body did not match the expected schema.
	#[error("malformed response from {endpoint}: {reason}")]
	MalformedResponse {
		endpoint: &'static str,
		reason: String,
	},

	/// A selected file could not be read from disk before upload.
	#[error("failed to read {}: {source}", .path.display())]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The configured base URL cannot address the backend.
	#[error("invalid backend url '{url}': {reason}")]
	InvalidUrl { url: String, reason: String },

	/// The task running the request was cancelled or panicked.
	#[error("{endpoint} request aborted: {reason}")]
	Aborted {
		endpoint: &'static str,
		reason: String,
	},
}

impl BackendError {
	pub fn malformed(endpoint: &'static str, reason: impl ToString) -> Self {
		Self::MalformedResponse {
			endpoint,
			reason: reason.to_string(),
		}
	}

	pub fn aborted(endpoint: &'static str, reason: impl ToString) -> Self {
		Self::Aborted {
			endpoint,
			reason: reason.to_string(),
		}
	}

	/// HTTP status of the failed response, when the backend produced one.
	#[must_use]
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// True when the backend answered but the payload could not be decoded.
	#[must_use]
	pub fn is_malformed(&self) -> bool {
		matches!(self, Self::MalformedResponse { .. })
	}
}

fn detail_suffix(body: &str) -> String {
	let trimmed = body.trim();
	if trimmed.is_empty() {
		String::new()
	} else {
		format!(": {trimmed}")
	}
}
