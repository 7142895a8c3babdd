use std::future::Future;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use ragdeck_backend::{
	Backend, BackendError, DOCUMENTS_ENDPOINT, Document, FileHandle, HEALTH_ENDPOINT,
	HealthStatus, INDEX_ENDPOINT, IndexReceipt, SEARCH_ENDPOINT, SearchRequest, SearchResults,
};
use tokio::runtime::Handle;

/// Outcome of one dispatched request, delivered back to the UI thread.
#[derive(Debug)]
pub(crate) enum Completion {
	Upload(Result<Option<IndexReceipt>, BackendError>),
	Search(Result<SearchResults, BackendError>),
	Documents(Result<Vec<Document>, BackendError>),
	Health(Result<HealthStatus, BackendError>),
}

/// Runs backend calls on the async runtime and funnels their outcomes into a
/// single channel drained by the controller.
pub(crate) struct Dispatcher {
	backend: Arc<dyn Backend>,
	runtime: Handle,
	tx: Sender<Completion>,
	rx: Receiver<Completion>,
}

impl Dispatcher {
	pub(crate) fn new(backend: Arc<dyn Backend>, runtime: Handle) -> Self {
		let (tx, rx) = mpsc::channel();
		Self {
			backend,
			runtime,
			tx,
			rx,
		}
	}

	pub(crate) fn upload(&self, files: Vec<FileHandle>) {
		let backend = Arc::clone(&self.backend);
		self.supervise(
			INDEX_ENDPOINT,
			async move { backend.index(files).await },
			Completion::Upload,
		);
	}

	pub(crate) fn search(&self, request: SearchRequest) {
		let backend = Arc::clone(&self.backend);
		self.supervise(
			SEARCH_ENDPOINT,
			async move { backend.search(request).await },
			Completion::Search,
		);
	}

	pub(crate) fn documents(&self) {
		let backend = Arc::clone(&self.backend);
		self.supervise(
			DOCUMENTS_ENDPOINT,
			async move { backend.documents().await },
			Completion::Documents,
		);
	}

	pub(crate) fn health(&self) {
		let backend = Arc::clone(&self.backend);
		self.supervise(
			HEALTH_ENDPOINT,
			async move { backend.health().await },
			Completion::Health,
		);
	}

	/// Spawn `request` and a watcher that always reports back, even when the
	/// request task panics or is cancelled.
	fn supervise<T, F>(
		&self,
		endpoint: &'static str,
		request: F,
		wrap: fn(Result<T, BackendError>) -> Completion,
	) where
		T: Send + 'static,
		F: Future<Output = Result<T, BackendError>> + Send + 'static,
	{
		let task = self.runtime.spawn(request);
		let tx = self.tx.clone();
		self.runtime.spawn(async move {
			let outcome = match task.await {
				Ok(outcome) => outcome,
				Err(err) => Err(BackendError::aborted(endpoint, err)),
			};
			if tx.send(wrap(outcome)).is_err() {
				tracing::debug!(endpoint, "controller dropped before the request settled");
			}
		});
	}

	pub(crate) fn try_recv(&self) -> Result<Completion, TryRecvError> {
		self.rx.try_recv()
	}

	pub(crate) fn recv(&self) -> Result<Completion, RecvError> {
		self.rx.recv()
	}

	pub(crate) fn recv_timeout(&self, timeout: Duration) -> Result<Completion, RecvTimeoutError> {
		self.rx.recv_timeout(timeout)
	}
}
