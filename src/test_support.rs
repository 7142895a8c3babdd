//! In-process [`Backend`] used to drive the controller in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use ragdeck_backend::{
	Backend, BackendError, Document, FileHandle, HealthStatus, IndexReceipt, SearchRequest,
	SearchResults, StatusCode, TextChunk,
};
use tokio::runtime::Runtime;
use tokio::sync::Semaphore;

use crate::ui::App;

/// How a scripted endpoint answers.
#[derive(Debug, Clone)]
pub(crate) enum Script<T> {
	Reply(T),
	Status(StatusCode),
	Malformed,
	Panic,
}

impl<T: Clone> Script<T> {
	fn play(&self, endpoint: &'static str) -> Result<T, BackendError> {
		match self {
			Self::Reply(value) => Ok(value.clone()),
			Self::Status(status) => Err(BackendError::Status {
				endpoint,
				status: *status,
				body: String::new(),
			}),
			Self::Malformed => Err(BackendError::malformed(endpoint, "expected field `response`")),
			Self::Panic => panic!("scripted panic from {endpoint}"),
		}
	}
}

/// Holds requests until permits are released.
#[derive(Clone)]
pub(crate) struct Gate(Arc<Semaphore>);

impl Gate {
	pub(crate) fn closed() -> Self {
		Self(Arc::new(Semaphore::new(0)))
	}

	pub(crate) fn release(&self, permits: usize) {
		self.0.add_permits(permits);
	}

	async fn pass(&self) {
		if let Ok(permit) = self.0.acquire().await {
			permit.forget();
		}
	}
}

#[derive(Default)]
pub(crate) struct Calls {
	pub(crate) index: AtomicUsize,
	pub(crate) search: AtomicUsize,
	pub(crate) documents: AtomicUsize,
	pub(crate) health: AtomicUsize,
}

pub(crate) struct ScriptedBackend {
	pub(crate) calls: Calls,
	index: Mutex<Script<Option<IndexReceipt>>>,
	search: Mutex<Script<SearchResults>>,
	documents: Mutex<Script<Vec<Document>>>,
	index_gate: Option<Gate>,
	search_gate: Option<Gate>,
	uploads: Mutex<Vec<Vec<FileHandle>>>,
	searches: Mutex<Vec<SearchRequest>>,
}

impl Default for ScriptedBackend {
	fn default() -> Self {
		Self {
			calls: Calls::default(),
			index: Mutex::new(Script::Reply(Some(IndexReceipt {
				success: true,
				message: "Documents processed and indexed successfully".into(),
				document_count: Some(4),
			}))),
			search: Mutex::new(Script::Reply(SearchResults::Answer("Result text...".into()))),
			documents: Mutex::new(Script::Reply(Vec::new())),
			index_gate: None,
			search_gate: None,
			uploads: Mutex::new(Vec::new()),
			searches: Mutex::new(Vec::new()),
		}
	}
}

impl ScriptedBackend {
	pub(crate) fn with_index(self, script: Script<Option<IndexReceipt>>) -> Self {
		*self.index.lock().unwrap() = script;
		self
	}

	pub(crate) fn with_search(self, script: Script<SearchResults>) -> Self {
		*self.search.lock().unwrap() = script;
		self
	}

	pub(crate) fn with_documents(self, script: Script<Vec<Document>>) -> Self {
		*self.documents.lock().unwrap() = script;
		self
	}

	pub(crate) fn with_index_gate(mut self, gate: Gate) -> Self {
		self.index_gate = Some(gate);
		self
	}

	pub(crate) fn with_search_gate(mut self, gate: Gate) -> Self {
		self.search_gate = Some(gate);
		self
	}

	pub(crate) fn set_search(&self, script: Script<SearchResults>) {
		*self.search.lock().unwrap() = script;
	}

	pub(crate) fn set_index(&self, script: Script<Option<IndexReceipt>>) {
		*self.index.lock().unwrap() = script;
	}

	pub(crate) fn index_calls(&self) -> usize {
		self.calls.index.load(Ordering::SeqCst)
	}

	pub(crate) fn search_calls(&self) -> usize {
		self.calls.search.load(Ordering::SeqCst)
	}

	pub(crate) fn documents_calls(&self) -> usize {
		self.calls.documents.load(Ordering::SeqCst)
	}

	pub(crate) fn uploads(&self) -> Vec<Vec<FileHandle>> {
		self.uploads.lock().unwrap().clone()
	}

	pub(crate) fn searches(&self) -> Vec<SearchRequest> {
		self.searches.lock().unwrap().clone()
	}
}

#[async_trait]
impl Backend for ScriptedBackend {
	async fn index(&self, files: Vec<FileHandle>) -> Result<Option<IndexReceipt>, BackendError> {
		self.calls.index.fetch_add(1, Ordering::SeqCst);
		self.uploads.lock().unwrap().push(files);
		if let Some(gate) = &self.index_gate {
			gate.pass().await;
		}
		let script = self.index.lock().unwrap().clone();
		script.play("/index")
	}

	async fn search(&self, request: SearchRequest) -> Result<SearchResults, BackendError> {
		self.calls.search.fetch_add(1, Ordering::SeqCst);
		self.searches.lock().unwrap().push(request);
		if let Some(gate) = &self.search_gate {
			gate.pass().await;
		}
		let script = self.search.lock().unwrap().clone();
		script.play("/search")
	}

	async fn documents(&self) -> Result<Vec<Document>, BackendError> {
		self.calls.documents.fetch_add(1, Ordering::SeqCst);
		let script = self.documents.lock().unwrap().clone();
		script.play("/documents")
	}

	async fn health(&self) -> Result<HealthStatus, BackendError> {
		self.calls.health.fetch_add(1, Ordering::SeqCst);
		Ok(HealthStatus {
			status: "healthy".into(),
		})
	}
}

pub(crate) fn runtime() -> Runtime {
	tokio::runtime::Builder::new_multi_thread()
		.worker_threads(2)
		.enable_all()
		.build()
		.expect("test runtime")
}

/// Generous upper bound for requests that should settle immediately.
pub(crate) const SETTLE: Duration = Duration::from_secs(5);

pub(crate) fn report_pdf() -> FileHandle {
	FileHandle::new("report.pdf", 2048, "/tmp/report.pdf")
}

pub(crate) fn sample_document() -> Document {
	Document {
		filename: "report.pdf".into(),
		file_size: 2048,
		file_type: "application/pdf".into(),
		pages: vec![1, 2],
		created_at: "2024-05-01T09:30:00Z".into(),
		modified_at: "2024-05-02T10:00:00+02:00".into(),
		storage_path: "/srv/rag/report.pdf".into(),
		chunks: vec![
			TextChunk {
				page: 1,
				text: "Executive summary".into(),
			},
			TextChunk {
				page: 2,
				text: "Findings and next steps".into(),
			},
		],
	}
}

/// Pump `app` until no request is pending.
pub(crate) fn wait_idle(app: &mut App<'_>) {
	let deadline = Instant::now() + SETTLE;
	app.pump();
	while app.controller().any_pending() && Instant::now() < deadline {
		std::thread::sleep(Duration::from_millis(5));
		app.pump();
	}
	assert!(!app.controller().any_pending(), "requests did not settle");
}
