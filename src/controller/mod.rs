//! Interaction state machine for the control panel.
//!
//! The [`Controller`] owns every piece of UI state and is only ever mutated
//! from the thread that drives the UI. Requests run on a tokio runtime and
//! report back through [`Controller::pump`] (non-blocking, once per frame) or
//! [`Controller::settle`] (blocking, for headless use).
//!
//! Upload, search, and document listing each follow the same shape:
//! `Idle -> Pending -> Idle`. A submission whose precondition fails is a
//! no-op, and the pending flag is cleared on both success and failure.

mod dispatch;
mod state;

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use chrono::Utc;
use ragdeck_backend::{
	Backend, BackendError, Document, FileHandle, HealthStatus, IndexReceipt, ResultCount,
	SearchRequest, SearchResults,
};
use tokio::runtime::Handle;

use dispatch::{Completion, Dispatcher};
use state::OperationState;
pub use state::{Blocked, Diagnostic, OperationKind, SelectionSet, Submission, View};

/// Number of diagnostics retained before the oldest are dropped.
pub const DIAGNOSTIC_CAPACITY: usize = 32;

pub struct Controller {
	view: View,
	selection: SelectionSet,
	query: String,
	result_count: ResultCount,
	results: Option<SearchResults>,
	documents: Vec<Document>,
	last_receipt: Option<IndexReceipt>,
	health: Option<HealthStatus>,
	upload_op: OperationState,
	search_op: OperationState,
	documents_op: OperationState,
	health_op: OperationState,
	diagnostics: VecDeque<Diagnostic>,
	refresh_after_upload: bool,
	uploads_completed: u64,
	dispatcher: Dispatcher,
}

impl Controller {
	/// Build a controller whose requests run on `runtime`.
	pub fn new(backend: Arc<dyn Backend>, runtime: Handle) -> Self {
		Self {
			view: View::default(),
			selection: SelectionSet::default(),
			query: String::new(),
			result_count: ResultCount::DEFAULT,
			results: None,
			documents: Vec::new(),
			last_receipt: None,
			health: None,
			upload_op: OperationState::default(),
			search_op: OperationState::default(),
			documents_op: OperationState::default(),
			health_op: OperationState::default(),
			diagnostics: VecDeque::with_capacity(DIAGNOSTIC_CAPACITY),
			refresh_after_upload: true,
			uploads_completed: 0,
			dispatcher: Dispatcher::new(backend, runtime),
		}
	}

	/// Whether a successful upload should immediately refresh the document list.
	pub fn set_refresh_after_upload(&mut self, enabled: bool) {
		self.refresh_after_upload = enabled;
	}

	#[must_use]
	pub fn view(&self) -> View {
		self.view
	}

	#[must_use]
	pub fn selection(&self) -> &SelectionSet {
		&self.selection
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn result_count(&self) -> ResultCount {
		self.result_count
	}

	#[must_use]
	pub fn results(&self) -> Option<&SearchResults> {
		self.results.as_ref()
	}

	#[must_use]
	pub fn documents(&self) -> &[Document] {
		&self.documents
	}

	#[must_use]
	pub fn last_receipt(&self) -> Option<&IndexReceipt> {
		self.last_receipt.as_ref()
	}

	/// Number of uploads that have succeeded so far.
	#[must_use]
	pub fn uploads_completed(&self) -> u64 {
		self.uploads_completed
	}

	#[must_use]
	pub fn health(&self) -> Option<&HealthStatus> {
		self.health.as_ref()
	}

	/// Failures recorded so far, oldest first.
	pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
		self.diagnostics.iter()
	}

	#[must_use]
	pub fn is_pending(&self, kind: OperationKind) -> bool {
		self.op(kind).is_pending()
	}

	#[must_use]
	pub fn any_pending(&self) -> bool {
		OperationKind::ALL.into_iter().any(|kind| self.is_pending(kind))
	}

	/// Message of the most recent failure of `kind`, cleared by its next success.
	#[must_use]
	pub fn last_error(&self, kind: OperationKind) -> Option<&str> {
		self.op(kind).last_error()
	}

	#[must_use]
	pub fn can_submit_upload(&self) -> bool {
		self.upload_precondition().is_ok()
	}

	#[must_use]
	pub fn can_submit_search(&self) -> bool {
		self.search_precondition().is_ok()
	}

	#[must_use]
	pub fn can_refresh_documents(&self) -> bool {
		!self.documents_op.is_pending()
	}

	/// Replace the selection with `files`. The last selection always wins.
	pub fn select_files(&mut self, files: impl IntoIterator<Item = FileHandle>) {
		self.selection.replace(files);
		tracing::debug!(files = self.selection.len(), "selection replaced");
	}

	/// Upload every selected file for indexing.
	pub fn submit_upload(&mut self) -> Submission {
		if let Err(reason) = self.upload_precondition() {
			tracing::debug!(%reason, "upload not submitted");
			return Submission::Blocked(reason);
		}
		self.upload_op.begin();
		let files = self.selection.files().to_vec();
		tracing::info!(
			files = files.len(),
			bytes = self.selection.total_bytes(),
			"dispatching upload"
		);
		self.dispatcher.upload(files);
		Submission::Dispatched
	}

	pub fn update_query(&mut self, text: impl Into<String>) {
		self.query = text.into();
	}

	/// Set the result count, clamping into the accepted range.
	pub fn update_result_count(&mut self, requested: i64) {
		self.result_count = ResultCount::clamped(requested);
	}

	/// Send the current query to the backend.
	pub fn submit_search(&mut self) -> Submission {
		let request = match self.search_precondition() {
			Ok(request) => request,
			Err(reason) => {
				tracing::debug!(%reason, "search not submitted");
				return Submission::Blocked(reason);
			}
		};
		self.search_op.begin();
		tracing::info!(limit = request.limit().get(), "dispatching search");
		self.dispatcher.search(request);
		Submission::Dispatched
	}

	pub fn switch_view(&mut self, view: View) {
		if self.view != view {
			tracing::debug!(from = %self.view, to = %view, "switching view");
			self.view = view;
		}
	}

	/// Fetch the list of indexed documents.
	pub fn refresh_documents(&mut self) -> Submission {
		if self.documents_op.is_pending() {
			return Submission::Blocked(Blocked::Pending(OperationKind::Documents));
		}
		self.documents_op.begin();
		tracing::info!("dispatching documents refresh");
		self.dispatcher.documents();
		Submission::Dispatched
	}

	/// Ask the backend's health endpoint whether it is up.
	pub fn check_health(&mut self) -> Submission {
		if self.health_op.is_pending() {
			return Submission::Blocked(Blocked::Pending(OperationKind::Health));
		}
		self.health_op.begin();
		self.dispatcher.health();
		Submission::Dispatched
	}

	/// Apply every completion that has already arrived. Returns how many were applied.
	pub fn pump(&mut self) -> usize {
		let mut applied = 0;
		loop {
			match self.dispatcher.try_recv() {
				Ok(completion) => {
					self.apply(completion);
					applied += 1;
				}
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
		applied
	}

	/// Block until nothing is pending or `timeout` elapses. Returns `true` when idle.
	pub fn settle(&mut self, timeout: Option<Duration>) -> bool {
		let deadline = timeout.map(|timeout| Instant::now() + timeout);
		while self.any_pending() {
			let completion = match deadline {
				Some(deadline) => {
					let remaining = deadline.saturating_duration_since(Instant::now());
					match self.dispatcher.recv_timeout(remaining) {
						Ok(completion) => completion,
						Err(_) => return false,
					}
				}
				None => match self.dispatcher.recv() {
					Ok(completion) => completion,
					Err(_) => return false,
				},
			};
			self.apply(completion);
		}
		true
	}

	fn upload_precondition(&self) -> Result<(), Blocked> {
		if self.upload_op.is_pending() {
			return Err(Blocked::Pending(OperationKind::Upload));
		}
		if self.selection.is_empty() {
			return Err(Blocked::NothingSelected);
		}
		Ok(())
	}

	fn search_precondition(&self) -> Result<SearchRequest, Blocked> {
		if self.search_op.is_pending() {
			return Err(Blocked::Pending(OperationKind::Search));
		}
		SearchRequest::new(self.query.clone(), self.result_count).ok_or(Blocked::EmptyQuery)
	}

	fn apply(&mut self, completion: Completion) {
		match completion {
			Completion::Upload(Ok(receipt)) => {
				let uploaded = self.selection.len();
				self.selection.clear();
				self.upload_op.succeed();
				self.switch_view(View::Documents);
				if let Some(receipt) = &receipt {
					tracing::info!(
						files = uploaded,
						chunks = ?receipt.document_count,
						message = %receipt.message,
						"upload indexed"
					);
				} else {
					tracing::info!(files = uploaded, "upload indexed");
				}
				self.last_receipt = receipt;
				self.uploads_completed += 1;
				if self.refresh_after_upload {
					self.refresh_documents();
				}
			}
			Completion::Upload(Err(err)) => self.record_failure(OperationKind::Upload, &err),
			Completion::Search(Ok(results)) => {
				tracing::info!(blocks = results.len(), "search completed");
				self.results = Some(results);
				self.search_op.succeed();
			}
			Completion::Search(Err(err)) => self.record_failure(OperationKind::Search, &err),
			Completion::Documents(Ok(documents)) => {
				tracing::info!(documents = documents.len(), "documents refreshed");
				self.documents = documents;
				self.documents_op.succeed();
			}
			Completion::Documents(Err(err)) => {
				self.record_failure(OperationKind::Documents, &err)
			}
			Completion::Health(Ok(status)) => {
				tracing::info!(status = %status.status, "health checked");
				self.health = Some(status);
				self.health_op.succeed();
			}
			Completion::Health(Err(err)) => self.record_failure(OperationKind::Health, &err),
		}
	}

	fn record_failure(&mut self, kind: OperationKind, err: &BackendError) {
		let message = err.to_string();
		tracing::warn!(operation = %kind, error = %message, "operation failed");
		self.op_mut(kind).fail(message.clone());
		if self.diagnostics.len() == DIAGNOSTIC_CAPACITY {
			self.diagnostics.pop_front();
		}
		self.diagnostics.push_back(Diagnostic {
			kind,
			message,
			at: Utc::now(),
		});
	}

	fn op(&self, kind: OperationKind) -> &OperationState {
		match kind {
			OperationKind::Upload => &self.upload_op,
			OperationKind::Search => &self.search_op,
			OperationKind::Documents => &self.documents_op,
			OperationKind::Health => &self.health_op,
		}
	}

	fn op_mut(&mut self, kind: OperationKind) -> &mut OperationState {
		match kind {
			OperationKind::Upload => &mut self.upload_op,
			OperationKind::Search => &mut self.search_op,
			OperationKind::Documents => &mut self.documents_op,
			OperationKind::Health => &mut self.health_op,
		}
	}
}
