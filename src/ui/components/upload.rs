use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::controller::{OperationKind, View};
use crate::presentation::format_size;
use crate::ui::App;

/// Picker table on the left, staged selection and upload control on the right.
pub fn render_upload(frame: &mut Frame, area: Rect, app: &mut App<'_>) {
	let columns = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
		.split(area);
	render_picker(frame, columns[0], app);
	render_selection(frame, columns[1], app);
}

fn render_picker(frame: &mut Frame, area: Rect, app: &mut App<'_>) {
	let theme = app.theme;
	let title = picker_title(
		&app.ui.pane(View::Upload).title,
		app.picker.root(),
		app.picker.skipped(),
	);
	let block = Block::default()
		.borders(Borders::ALL)
		.title(Span::styled(title, theme.header_style()));

	if app.picker.is_empty() {
		let empty = Paragraph::new("No PDF files found")
			.style(theme.empty_style())
			.block(block);
		frame.render_widget(empty, area);
		return;
	}

	let rows: Vec<Row> = app
		.picker
		.entries()
		.iter()
		.enumerate()
		.map(|(index, entry)| {
			let mark = if app.picker.is_marked(index) {
				"[x]"
			} else {
				"[ ]"
			};
			Row::new([
				Cell::from(mark),
				Cell::from(entry.relative.as_str()),
				Cell::from(format_size(entry.handle.size)),
			])
		})
		.collect();
	let table = Table::new(
		rows,
		[
			Constraint::Length(3),
			Constraint::Min(10),
			Constraint::Length(10),
		],
	)
	.header(Row::new(["", "Path", "Size"]).style(theme.header_style()))
	.row_highlight_style(theme.row_highlight_style())
	.block(block);
	frame.render_stateful_widget(table, area, &mut app.picker_state);
}

/// Pane title naming the root, plus how many entries the last scan could not read.
fn picker_title(pane: &str, root: &Path, skipped: usize) -> String {
	if skipped == 0 {
		format!(" {pane} · {} ", root.display())
	} else {
		format!(" {pane} · {} · {skipped} unreadable ", root.display())
	}
}

fn render_selection(frame: &mut Frame, area: Rect, app: &App<'_>) {
	let theme = &app.theme;
	let controller = &app.controller;
	let selection = controller.selection();
	let mut lines = Vec::new();

	if selection.is_empty() {
		lines.push(Line::styled("Nothing selected", theme.empty_style()));
	} else {
		for file in selection.iter() {
			lines.push(Line::from(vec![
				Span::raw(file.name.clone()),
				Span::styled(format!("  {}", format_size(file.size)), theme.empty_style()),
			]));
		}
		lines.push(Line::styled(
			format!(
				"{} file{} · {}",
				selection.len(),
				if selection.len() == 1 { "" } else { "s" },
				format_size(selection.total_bytes())
			),
			theme.prompt_style(),
		));
	}
	lines.push(Line::default());

	let button = if controller.is_pending(OperationKind::Upload) {
		Span::styled("[ Uploading… ]", theme.prompt_style())
	} else if controller.can_submit_upload() {
		Span::styled("[ Upload (u) ]", theme.highlight_style())
	} else {
		Span::styled("[ Upload ]", theme.disabled_style())
	};
	lines.push(Line::from(button));

	if let Some(receipt) = controller.last_receipt() {
		lines.push(Line::default());
		let mut summary = receipt.message.clone();
		if let Some(count) = receipt.document_count {
			summary.push_str(&format!(" ({count} chunks)"));
		}
		lines.push(Line::styled(summary, theme.success_style()));
	}

	let block = Block::default()
		.borders(Borders::ALL)
		.title(Span::styled(" Selection ", theme.header_style()));
	let paragraph = Paragraph::new(lines)
		.block(block)
		.wrap(Wrap { trim: false });
	frame.render_widget(paragraph, area);
}
