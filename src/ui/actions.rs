use std::ops::ControlFlow;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::controller::View;

const PAGE: i16 = 10;

impl<'a> App<'a> {
	/// Process a key press. `Break` means the user asked to quit.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> ControlFlow<()> {
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			return ControlFlow::Break(());
		}
		match key.code {
			KeyCode::Esc => return ControlFlow::Break(()),
			KeyCode::Tab => self.switch_view(self.view().next()),
			KeyCode::BackTab => self.switch_view(self.view().previous()),
			KeyCode::F(1) => self.switch_view(View::Upload),
			KeyCode::F(2) => self.switch_view(View::Search),
			KeyCode::F(3) => self.switch_view(View::Documents),
			_ => match self.view() {
				View::Upload => self.handle_upload_key(key),
				View::Search => self.handle_search_key(key),
				View::Documents => self.handle_documents_key(key),
			},
		}
		ControlFlow::Continue(())
	}

	fn handle_upload_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::Up | KeyCode::Char('k') => self.move_picker(-1),
			KeyCode::Down | KeyCode::Char('j') => self.move_picker(1),
			KeyCode::PageUp => self.move_picker(-isize::from(PAGE)),
			KeyCode::PageDown => self.move_picker(isize::from(PAGE)),
			KeyCode::Char(' ') => self.picker.toggle(),
			KeyCode::Char('a') => self.picker.toggle_all(),
			KeyCode::Enter => self.select_from_picker(),
			KeyCode::Char('u') => self.submit_upload(),
			KeyCode::Char('r') => self.rescan_picker(),
			KeyCode::Char('c') => self.clear_selection(),
			_ => {}
		}
	}

	fn handle_search_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::Enter => self.submit_search(),
			KeyCode::Up => self.adjust_result_count(1),
			KeyCode::Down => self.adjust_result_count(-1),
			KeyCode::PageUp => self.scroll_results(-PAGE),
			KeyCode::PageDown => self.scroll_results(PAGE),
			_ => {
				if self.query_input.input(key) {
					self.query_edited();
				}
			}
		}
	}

	fn handle_documents_key(&mut self, key: KeyEvent) {
		match key.code {
			KeyCode::Up | KeyCode::Char('k') => self.move_document(-1),
			KeyCode::Down | KeyCode::Char('j') => self.move_document(1),
			KeyCode::PageUp => self.scroll_detail(-PAGE),
			KeyCode::PageDown => self.scroll_detail(PAGE),
			KeyCode::Char('r') => self.refresh_documents(),
			_ => {}
		}
	}
}
