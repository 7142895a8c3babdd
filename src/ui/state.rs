use std::sync::Arc;

use ragdeck_backend::{Backend, Document, ResultCount};
use ratatui::widgets::TableState;
use throbber_widgets_tui::ThrobberState;
use tokio::runtime::Handle;

use super::config::UiConfig;
use super::input::QueryInput;
use super::theme::Theme;
use crate::controller::{Controller, Submission, View};
use crate::picker::{FilePicker, PickerOptions};

/// Everything the panel needs besides the backend itself.
#[derive(Debug, Clone)]
pub struct PanelOptions {
	pub theme: Theme,
	pub start_view: View,
	pub result_count: ResultCount,
	pub picker: PickerOptions,
	/// Shown in the header, usually the backend URL.
	pub backend_label: String,
	pub ui: UiConfig,
}

impl Default for PanelOptions {
	fn default() -> Self {
		Self {
			theme: Theme::default(),
			start_view: View::default(),
			result_count: ResultCount::DEFAULT,
			picker: PickerOptions::default(),
			backend_label: ragdeck_backend::DEFAULT_BASE_URL.to_string(),
			ui: UiConfig::default(),
		}
	}
}

/// Short-lived message in the status line, replaced by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
	Info(String),
	Warning(String),
}

pub struct App<'a> {
	pub(crate) controller: Controller,
	pub(crate) picker: FilePicker,
	pub(crate) query_input: QueryInput<'a>,
	pub(crate) theme: Theme,
	pub(crate) ui: UiConfig,
	pub(crate) backend_label: String,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) picker_state: TableState,
	pub(crate) documents_state: TableState,
	pub(crate) results_scroll: u16,
	pub(crate) detail_scroll: u16,
	pub(crate) notice: Option<Notice>,
	documents_requested: bool,
}

impl<'a> App<'a> {
	pub fn new(backend: Arc<dyn Backend>, runtime: Handle, options: PanelOptions) -> Self {
		let PanelOptions {
			theme,
			start_view,
			result_count,
			picker,
			backend_label,
			ui,
		} = options;

		let mut controller = Controller::new(backend, runtime);
		controller.update_result_count(i64::from(result_count.get()));

		let mut picker = FilePicker::new(picker);
		let notice = picker
			.rescan()
			.err()
			.map(|err| Notice::Warning(format!("{err:#}")));

		let mut app = Self {
			controller,
			picker,
			query_input: QueryInput::default(),
			theme,
			ui,
			backend_label,
			throbber_state: ThrobberState::default(),
			picker_state: TableState::default(),
			documents_state: TableState::default(),
			results_scroll: 0,
			detail_scroll: 0,
			notice,
			documents_requested: false,
		};
		app.sync_picker_state();
		app.switch_view(start_view);
		app
	}

	#[must_use]
	pub fn controller(&self) -> &Controller {
		&self.controller
	}

	#[must_use]
	pub fn view(&self) -> View {
		self.controller.view()
	}

	/// Switch views, fetching the document list the first time it is shown.
	pub fn switch_view(&mut self, view: View) {
		self.controller.switch_view(view);
		if view == View::Documents && !self.documents_requested {
			self.refresh_documents();
		}
	}

	/// Apply finished requests and keep the widgets in step with the controller.
	pub fn pump(&mut self) -> usize {
		let uploads_before = self.controller.uploads_completed();
		let applied = self.controller.pump();
		if applied == 0 {
			return 0;
		}

		if self.controller.uploads_completed() > uploads_before {
			self.picker.clear_marks();
			let uploaded = match self.controller.last_receipt() {
				Some(receipt) if !receipt.message.is_empty() => receipt.message.clone(),
				_ => "Upload complete".to_string(),
			};
			self.notice = Some(Notice::Info(uploaded));
			self.documents_requested = true;
		}
		self.sync_documents_state();
		applied
	}

	pub(crate) fn select_from_picker(&mut self) {
		let files = self.picker.selection();
		if files.is_empty() {
			self.notice = Some(Notice::Warning("no PDF files to select".into()));
			return;
		}
		let count = files.len();
		self.controller.select_files(files);
		self.notice = Some(Notice::Info(format!(
			"{count} file{} selected",
			if count == 1 { "" } else { "s" }
		)));
	}

	pub(crate) fn clear_selection(&mut self) {
		self.picker.clear_marks();
		self.controller.select_files(Vec::new());
		self.notice = None;
	}

	pub(crate) fn rescan_picker(&mut self) {
		match self.picker.rescan() {
			Ok(()) => {
				self.notice = Some(Notice::Info(format!(
					"found {} PDF files under {}",
					self.picker.entries().len(),
					self.picker.root().display()
				)));
			}
			Err(err) => self.notice = Some(Notice::Warning(format!("{err:#}"))),
		}
		self.sync_picker_state();
	}

	pub(crate) fn move_picker(&mut self, delta: isize) {
		self.picker.move_cursor(delta);
		self.sync_picker_state();
	}

	pub(crate) fn submit_upload(&mut self) {
		let submission = self.controller.submit_upload();
		self.note_submission(submission);
	}

	pub(crate) fn submit_search(&mut self) {
		let submission = self.controller.submit_search();
		if submission.is_dispatched() {
			self.results_scroll = 0;
		}
		self.note_submission(submission);
	}

	pub(crate) fn refresh_documents(&mut self) {
		let submission = self.controller.refresh_documents();
		if submission.is_dispatched() {
			self.documents_requested = true;
		}
		self.note_submission(submission);
	}

	/// Mirror the query field into the controller after an edit.
	pub(crate) fn query_edited(&mut self) {
		self.controller.update_query(self.query_input.text());
	}

	pub(crate) fn adjust_result_count(&mut self, delta: i64) {
		let current = i64::from(self.controller.result_count().get());
		self.controller.update_result_count(current + delta);
	}

	pub(crate) fn move_document(&mut self, delta: isize) {
		let len = self.controller.documents().len();
		if len == 0 {
			return;
		}
		let current = self.documents_state.selected().unwrap_or(0);
		let next = current.saturating_add_signed(delta).min(len - 1);
		if next != current {
			self.detail_scroll = 0;
		}
		self.documents_state.select(Some(next));
	}

	pub(crate) fn scroll_results(&mut self, delta: i16) {
		self.results_scroll = self.results_scroll.saturating_add_signed(delta);
	}

	pub(crate) fn scroll_detail(&mut self, delta: i16) {
		self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
	}

	#[must_use]
	pub fn selected_document(&self) -> Option<&Document> {
		let index = self.documents_state.selected()?;
		self.controller.documents().get(index)
	}

	fn note_submission(&mut self, submission: Submission) {
		self.notice = match submission {
			Submission::Dispatched => None,
			Submission::Blocked(reason) => Some(Notice::Warning(reason.to_string())),
		};
	}

	fn sync_picker_state(&mut self) {
		if self.picker.is_empty() {
			self.picker_state.select(None);
		} else {
			self.picker_state.select(Some(self.picker.cursor()));
		}
	}

	fn sync_documents_state(&mut self) {
		let len = self.controller.documents().len();
		match self.documents_state.selected() {
			_ if len == 0 => self.documents_state.select(None),
			None => self.documents_state.select(Some(0)),
			Some(selected) if selected >= len => self.documents_state.select(Some(len - 1)),
			Some(_) => {}
		}
	}
}
