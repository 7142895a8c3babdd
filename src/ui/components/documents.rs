use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::controller::{OperationKind, View};
use crate::presentation::{DocumentView, format_size};
use crate::ui::App;
use crate::ui::theme::Theme;

/// Document list on the left, details of the highlighted document on the right.
pub fn render_documents(frame: &mut Frame, area: Rect, app: &mut App<'_>) {
	let columns = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
		.split(area);
	render_list(frame, columns[0], app);

	let theme = app.theme;
	let (title, lines) = match app.selected_document() {
		Some(document) => {
			let view = DocumentView::from(document);
			(format!(" {} ", view.title), detail_lines(&view, &theme))
		}
		None => (" Details ".to_string(), Vec::new()),
	};
	let detail = Paragraph::new(lines)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.title(Span::styled(title, theme.header_style())),
		)
		.wrap(Wrap { trim: false })
		.scroll((app.detail_scroll, 0));
	frame.render_widget(detail, columns[1]);
}

fn render_list(frame: &mut Frame, area: Rect, app: &mut App<'_>) {
	let theme = app.theme;
	let pending = app.controller.is_pending(OperationKind::Documents);
	let pane_title = &app.ui.pane(View::Documents).title;
	let title = if pending {
		format!(" {pane_title} (loading…) ")
	} else {
		format!(" {pane_title} ({}) ", app.controller.documents().len())
	};
	let block = Block::default()
		.borders(Borders::ALL)
		.title(Span::styled(title, theme.header_style()));

	if app.controller.documents().is_empty() {
		let message = if pending {
			"Loading…"
		} else {
			"No documents indexed yet. Press r to refresh."
		};
		frame.render_widget(
			Paragraph::new(message)
				.style(theme.empty_style())
				.block(block),
			area,
		);
		return;
	}

	let rows: Vec<Row> = app
		.controller
		.documents()
		.iter()
		.map(|document| {
			Row::new([
				Cell::from(document.filename.as_str()),
				Cell::from(format_size(document.file_size)),
				Cell::from(document.pages.len().to_string()),
			])
		})
		.collect();
	let table = Table::new(
		rows,
		[
			Constraint::Min(10),
			Constraint::Length(10),
			Constraint::Length(5),
		],
	)
	.header(Row::new(["Name", "Size", "Pages"]).style(theme.header_style()))
	.row_highlight_style(theme.row_highlight_style())
	.block(block);
	frame.render_stateful_widget(table, area, &mut app.documents_state);
}

pub(crate) fn detail_lines(view: &DocumentView, theme: &Theme) -> Vec<Line<'static>> {
	let mut lines = Vec::new();
	for panel in &view.panels {
		lines.push(Line::styled(
			panel.title,
			theme.prompt_style().add_modifier(Modifier::BOLD),
		));
		let label_width = panel
			.fields
			.iter()
			.map(|field| field.label.len())
			.max()
			.unwrap_or(0);
		for field in &panel.fields {
			lines.push(Line::from(vec![
				Span::styled(
					format!("  {:<label_width$}  ", field.label),
					theme.empty_style(),
				),
				Span::raw(field.value.clone()),
			]));
		}
		lines.push(Line::default());
	}

	for page in &view.pages {
		lines.push(Line::styled(page.heading.clone(), theme.highlight_style()));
		lines.extend(page.text.lines().map(|line| Line::from(line.to_string())));
		lines.push(Line::default());
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::sample_document;

	#[test]
	fn details_list_panels_then_pages() {
		let view = DocumentView::from(&sample_document());
		let lines: Vec<String> = detail_lines(&view, &Theme::default())
			.iter()
			.map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
			.collect();

		assert_eq!(lines[0], "File details");
		assert_eq!(lines[1], "  Name   report.pdf");
		assert_eq!(lines[2], "  Size   2.0 KiB");
		assert!(lines.contains(&"Dates".to_string()));
		assert!(lines.contains(&"  Created   2024-05-01 09:30 UTC".to_string()));
		assert!(lines.contains(&"  Path  /srv/rag/report.pdf".to_string()));
		let page_one = lines.iter().position(|line| line == "Page 1").unwrap();
		assert_eq!(lines[page_one + 1], "Executive summary");
	}
}
