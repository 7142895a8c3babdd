use ragdeck_backend::{SearchHit, SearchResults};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::controller::{OperationKind, View};
use crate::ui::App;
use crate::ui::theme::Theme;

/// Query field and result count on top, scrollable results below.
pub fn render_search(frame: &mut Frame, area: Rect, app: &App<'_>) {
	let rows = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Length(3), Constraint::Min(1)])
		.split(area);
	let top = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Min(10), Constraint::Length(16)])
		.split(rows[0]);

	let theme = &app.theme;
	let query_block = Block::default()
		.borders(Borders::ALL)
		.title(Span::styled(" Query ", theme.header_style()));
	let query_inner = query_block.inner(top[0]);
	frame.render_widget(query_block, top[0]);
	app.query_input.render(frame, query_inner);

	let count = Paragraph::new(Line::from(vec![
		Span::raw("↑ "),
		Span::styled(
			app.controller.result_count().to_string(),
			theme.highlight_style(),
		),
		Span::raw(" ↓"),
	]))
	.block(
		Block::default()
			.borders(Borders::ALL)
			.title(Span::styled(" Results ", theme.header_style())),
	);
	frame.render_widget(count, top[1]);

	let pending = app.controller.is_pending(OperationKind::Search);
	let title = if pending {
		format!(" {} (searching…) ", app.ui.pane(View::Search).title)
	} else {
		format!(" {} ", app.ui.pane(View::Search).title)
	};
	let block = Block::default()
		.borders(Borders::ALL)
		.title(Span::styled(title, theme.header_style()));
	let results = Paragraph::new(result_lines(app.controller.results(), theme))
		.block(block)
		.wrap(Wrap { trim: false })
		.scroll((app.results_scroll, 0));
	frame.render_widget(results, rows[1]);
}

pub(crate) fn result_lines(results: Option<&SearchResults>, theme: &Theme) -> Vec<Line<'static>> {
	match results {
		None => vec![Line::styled(
			"No search yet. Type a question and press Enter.",
			theme.empty_style(),
		)],
		Some(SearchResults::Answer(text)) => text
			.lines()
			.map(|line| Line::from(line.to_string()))
			.collect(),
		Some(SearchResults::Hits(hits)) if hits.is_empty() => {
			vec![Line::styled("No matches", theme.empty_style())]
		}
		Some(SearchResults::Hits(hits)) => hits
			.iter()
			.enumerate()
			.flat_map(|(index, hit)| hit_lines(index, hit, theme))
			.collect(),
	}
}

fn hit_lines(index: usize, hit: &SearchHit, theme: &Theme) -> Vec<Line<'static>> {
	let mut heading = vec![Span::styled(
		format!("{}.", index + 1),
		theme.highlight_style(),
	)];
	if let Some(source) = &hit.source {
		heading.push(Span::styled(
			format!(" {source}"),
			theme.prompt_style().add_modifier(Modifier::BOLD),
		));
	}
	if let Some(page) = hit.page {
		heading.push(Span::styled(format!(" · page {page}"), theme.empty_style()));
	}
	if let Some(score) = hit.score {
		heading.push(Span::styled(
			format!(" · score {score:.2}"),
			theme.empty_style(),
		));
	}

	let mut lines = vec![Line::from(heading)];
	lines.extend(hit.text.lines().map(|line| Line::from(line.to_string())));
	lines.push(Line::default());
	lines
}
