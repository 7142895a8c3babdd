//! One-shot operations for the command-line surface.
//!
//! A [`Session`] drives the same [`Controller`] as the panel, but submits a
//! single operation and blocks until it settles. A blocked submission or a
//! failed request becomes an error.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use ragdeck_backend::{
	Backend, Document, FileHandle, HealthStatus, IndexReceipt, ResultCount, SearchResults,
};
use tokio::runtime::Runtime;

use crate::controller::{Controller, OperationKind, Submission};

pub struct Session {
	controller: Controller,
	// Dropped after the controller so no completion is sent into a closed runtime.
	_runtime: Runtime,
}

impl Session {
	pub fn new(backend: Arc<dyn Backend>) -> Result<Self> {
		let runtime = tokio::runtime::Builder::new_multi_thread()
			.worker_threads(1)
			.thread_name("ragdeck-io")
			.enable_all()
			.build()
			.context("failed to start the request runtime")?;
		Ok(Self::with_runtime(backend, runtime))
	}

	pub fn with_runtime(backend: Arc<dyn Backend>, runtime: Runtime) -> Self {
		let mut controller = Controller::new(backend, runtime.handle().clone());
		controller.set_refresh_after_upload(false);
		Self {
			controller,
			_runtime: runtime,
		}
	}

	/// Upload `files` and return the backend's receipt, when it sent one.
	pub fn upload(&mut self, files: Vec<FileHandle>) -> Result<Option<IndexReceipt>> {
		self.controller.select_files(files);
		let submission = self.controller.submit_upload();
		self.finish(OperationKind::Upload, submission)?;
		Ok(self.controller.last_receipt().cloned())
	}

	pub fn search(&mut self, query: &str, result_count: ResultCount) -> Result<SearchResults> {
		self.controller.update_query(query);
		self.controller
			.update_result_count(i64::from(result_count.get()));
		let submission = self.controller.submit_search();
		self.finish(OperationKind::Search, submission)?;
		self.controller
			.results()
			.cloned()
			.ok_or_else(|| anyhow!("search finished without results"))
	}

	pub fn documents(&mut self) -> Result<Vec<Document>> {
		let submission = self.controller.refresh_documents();
		self.finish(OperationKind::Documents, submission)?;
		Ok(self.controller.documents().to_vec())
	}

	pub fn health(&mut self) -> Result<HealthStatus> {
		let submission = self.controller.check_health();
		self.finish(OperationKind::Health, submission)?;
		self.controller
			.health()
			.cloned()
			.ok_or_else(|| anyhow!("health check finished without a status"))
	}

	#[must_use]
	pub fn controller(&self) -> &Controller {
		&self.controller
	}

	fn finish(&mut self, kind: OperationKind, submission: Submission) -> Result<()> {
		if let Submission::Blocked(reason) = submission {
			bail!("{kind} not sent: {reason}");
		}
		self.controller.settle(None);
		match self.controller.last_error(kind) {
			Some(message) => bail!("{kind} failed: {message}"),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use ragdeck_backend::StatusCode;

	use super::*;
	use crate::test_support::{Script, ScriptedBackend, report_pdf, runtime, sample_document};

	fn session(backend: ScriptedBackend) -> (Session, Arc<ScriptedBackend>) {
		let backend = Arc::new(backend);
		let session = Session::with_runtime(backend.clone(), runtime());
		(session, backend)
	}

	#[test]
	fn upload_returns_receipt_without_refreshing() {
		let (mut session, backend) = session(ScriptedBackend::default());
		let receipt = session.upload(vec![report_pdf()]).unwrap();
		assert_eq!(receipt.and_then(|receipt| receipt.document_count), Some(4));
		assert_eq!(backend.documents_calls(), 0);
	}

	#[test]
	fn empty_upload_is_refused_before_sending() {
		let (mut session, backend) = session(ScriptedBackend::default());
		let err = session.upload(Vec::new()).unwrap_err();
		assert_eq!(err.to_string(), "upload not sent: no files are selected");
		assert_eq!(backend.index_calls(), 0);
	}

	#[test]
	fn search_passes_count_and_returns_results() {
		let (mut session, backend) = session(ScriptedBackend::default());
		let results = session
			.search("neural networks", ResultCount::clamped(10))
			.unwrap();
		assert_eq!(results, SearchResults::Answer("Result text...".into()));
		assert_eq!(backend.searches()[0].limit().get(), 10);
	}

	#[test]
	fn failed_request_becomes_an_error() {
		let (mut session, _) = session(
			ScriptedBackend::default()
				.with_search(Script::Status(StatusCode::INTERNAL_SERVER_ERROR)),
		);
		let err = session.search("rust", ResultCount::DEFAULT).unwrap_err();
		assert!(
			err.to_string().starts_with("search failed: /search returned 500"),
			"{err}"
		);
	}

	#[test]
	fn documents_and_health_round_out_the_session() {
		let (mut session, _) = session(
			ScriptedBackend::default().with_documents(Script::Reply(vec![sample_document()])),
		);
		assert_eq!(session.documents().unwrap(), vec![sample_document()]);
		assert!(session.health().unwrap().is_healthy());
	}
}
