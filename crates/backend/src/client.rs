use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::schema::SearchEnvelope;
use crate::{
	BackendError, Document, FileHandle, HealthStatus, IndexReceipt, SearchRequest, SearchResults,
};

pub const INDEX_ENDPOINT: &str = "/index";
pub const SEARCH_ENDPOINT: &str = "/search";
pub const DOCUMENTS_ENDPOINT: &str = "/documents";
pub const HEALTH_ENDPOINT: &str = "/health";

/// Multipart field name carrying each uploaded file.
pub const UPLOAD_FIELD: &str = "files";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:53232";

const PDF_MIME: &str = "application/pdf";

/// Operations the control panel needs from a RAG backend.
///
/// Implementations must be shareable across the runtime's worker threads;
/// every call is independent and carries no client-side session state.
#[async_trait]
pub trait Backend: Send + Sync {
	/// Upload and index `files`. Any 2xx status is success; the receipt is
	/// returned when the body happens to describe one.
	async fn index(&self, files: Vec<FileHandle>) -> Result<Option<IndexReceipt>, BackendError>;

	/// Run a search and return the decoded `response` payload.
	async fn search(&self, request: SearchRequest) -> Result<SearchResults, BackendError>;

	/// List the documents the backend has indexed.
	async fn documents(&self) -> Result<Vec<Document>, BackendError>;

	/// Check backend liveness.
	async fn health(&self) -> Result<HealthStatus, BackendError>;
}

/// [`Backend`] implementation speaking HTTP via `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
	client: reqwest::Client,
	base: Url,
}

impl HttpBackend {
	/// Build a client for the backend rooted at `base_url`.
	pub fn new(base_url: &str) -> Result<Self, BackendError> {
		let client = reqwest::Client::builder()
			.user_agent(concat!("ragdeck/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|source| BackendError::Transport {
				endpoint: "client",
				source,
			})?;
		Self::with_client(client, base_url)
	}

	/// Build a backend around an existing `reqwest` client.
	pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, BackendError> {
		Ok(Self {
			client,
			base: parse_base_url(base_url)?,
		})
	}

	/// Resolve an endpoint path against the base URL, keeping any base path prefix.
	#[must_use]
	pub fn endpoint_url(&self, endpoint: &str) -> Url {
		let mut url = self.base.clone();
		let path = format!(
			"{}/{}",
			url.path().trim_end_matches('/'),
			endpoint.trim_start_matches('/')
		);
		url.set_path(&path);
		url
	}

	async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, BackendError> {
		let response = self
			.client
			.get(self.endpoint_url(endpoint))
			.send()
			.await
			.map_err(|source| BackendError::Transport { endpoint, source })?;
		let response = ensure_success(endpoint, response).await?;
		decode_json(endpoint, response).await
	}
}

#[async_trait]
impl Backend for HttpBackend {
	async fn index(&self, files: Vec<FileHandle>) -> Result<Option<IndexReceipt>, BackendError> {
		let endpoint = INDEX_ENDPOINT;
		let mut form = Form::new();
		for file in &files {
			let bytes = file.read().await?;
			let part = Part::bytes(bytes)
				.file_name(file.name.clone())
				.mime_str(PDF_MIME)
				.map_err(|source| BackendError::Transport { endpoint, source })?;
			form = form.part(UPLOAD_FIELD, part);
		}
		tracing::debug!(endpoint, files = files.len(), "sending index request");

		let response = self
			.client
			.post(self.endpoint_url(endpoint))
			.multipart(form)
			.send()
			.await
			.map_err(|source| BackendError::Transport { endpoint, source })?;
		let response = ensure_success(endpoint, response).await?;
		// A 2xx status means the files were indexed; the receipt is optional.
		let receipt = match response.bytes().await {
			Ok(body) => serde_json::from_slice::<IndexReceipt>(&body).ok(),
			Err(err) => {
				tracing::debug!(endpoint, error = %err, "index receipt unreadable");
				None
			}
		};
		Ok(receipt)
	}

	async fn search(&self, request: SearchRequest) -> Result<SearchResults, BackendError> {
		let endpoint = SEARCH_ENDPOINT;
		tracing::debug!(endpoint, limit = request.limit().get(), "sending search request");
		let params = [
			("query", request.query().to_string()),
			("limit", request.limit().to_string()),
		];
		let response = self
			.client
			.post(self.endpoint_url(endpoint))
			.query(&params)
			.header(CONTENT_TYPE, "application/json")
			.send()
			.await
			.map_err(|source| BackendError::Transport { endpoint, source })?;
		let response = ensure_success(endpoint, response).await?;
		let envelope: SearchEnvelope = decode_json(endpoint, response).await?;
		Ok(envelope.response)
	}

	async fn documents(&self) -> Result<Vec<Document>, BackendError> {
		self.get_json(DOCUMENTS_ENDPOINT).await
	}

	async fn health(&self) -> Result<HealthStatus, BackendError> {
		self.get_json(HEALTH_ENDPOINT).await
	}
}

/// Parse and sanity-check a configured backend base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
	let invalid = |reason: String| BackendError::InvalidUrl {
		url: raw.to_string(),
		reason,
	};
	let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
	if !matches!(url.scheme(), "http" | "https") {
		return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
	}
	if url.cannot_be_a_base() || url.host_str().is_none() {
		return Err(invalid("missing host".to_string()));
	}
	Ok(url)
}

async fn ensure_success(endpoint: &'static str, response: Response) -> Result<Response, BackendError> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}
	let body = response.text().await.unwrap_or_default();
	Err(BackendError::Status {
		endpoint,
		status,
		body,
	})
}

async fn decode_json<T: DeserializeOwned>(
	endpoint: &'static str,
	response: Response,
) -> Result<T, BackendError> {
	let body = response
		.bytes()
		.await
		.map_err(|source| BackendError::Transport { endpoint, source })?;
	serde_json::from_slice(&body).map_err(|err| BackendError::malformed(endpoint, err))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_urls_keep_base_prefix() {
		let backend = HttpBackend::new("http://localhost:53232").expect("backend");
		assert_eq!(
			backend.endpoint_url(INDEX_ENDPOINT).as_str(),
			"http://localhost:53232/index"
		);

		let prefixed = HttpBackend::new("https://rag.example.com/api/").expect("backend");
		assert_eq!(
			prefixed.endpoint_url(SEARCH_ENDPOINT).as_str(),
			"https://rag.example.com/api/search"
		);
	}

	#[test]
	fn base_url_validation_rejects_unusable_urls() {
		assert!(matches!(
			parse_base_url("ftp://files.example.com"),
			Err(BackendError::InvalidUrl { .. })
		));
		assert!(matches!(
			parse_base_url("not a url"),
			Err(BackendError::InvalidUrl { .. })
		));
		assert!(parse_base_url(" http://127.0.0.1:8000 ").is_ok());
	}
}
