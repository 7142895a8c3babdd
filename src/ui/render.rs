use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin};

use super::App;
use super::components::{
	HeaderContext, StatusContext, render_documents, render_header, render_search, render_status,
	render_upload,
};
use crate::controller::View;

impl<'a> App<'a> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Min(3),
				Constraint::Length(2),
			])
			.split(area);

		let view = self.view();
		render_header(
			frame,
			HeaderContext {
				title: &self.ui.app_title,
				backend_label: &self.backend_label,
				view,
				ui: &self.ui,
				theme: &self.theme,
				area: layout[0],
			},
		);

		match view {
			View::Upload => render_upload(frame, layout[1], self),
			View::Search => render_search(frame, layout[1], self),
			View::Documents => render_documents(frame, layout[1], self),
		}

		render_status(
			frame,
			StatusContext {
				controller: &self.controller,
				notice: self.notice.as_ref(),
				hint: &self.ui.pane(view).hint,
				theme: &self.theme,
				throbber_state: &self.throbber_state,
				area: layout[2],
			},
		);
	}
}

#[cfg(test)]
mod tests;
