//! HTTP client for the two-endpoint contract of a RAG indexing/search backend.
//!
//! The [`Backend`] trait is the seam the control panel is written against;
//! [`HttpBackend`] is the production implementation.

mod client;
mod error;
mod files;
mod schema;

pub use client::{
	Backend, DEFAULT_BASE_URL, DOCUMENTS_ENDPOINT, HEALTH_ENDPOINT, HttpBackend, INDEX_ENDPOINT,
	SEARCH_ENDPOINT, UPLOAD_FIELD, parse_base_url,
};
pub use error::BackendError;
pub use files::{FileHandle, has_pdf_extension};
pub use reqwest::{StatusCode, Url};
pub use schema::{
	Document, HealthStatus, IndexReceipt, ResultCount, SearchHit, SearchRequest, SearchResults,
	TextChunk,
};
