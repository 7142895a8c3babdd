use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use unicode_width::UnicodeWidthStr;

use crate::controller::View;
use crate::ui::config::UiConfig;
use crate::ui::theme::Theme;

/// Argument bundle for the header row.
pub struct HeaderContext<'a> {
	pub title: &'a str,
	pub backend_label: &'a str,
	pub view: View,
	pub ui: &'a UiConfig,
	pub theme: &'a Theme,
	pub area: Rect,
}

/// Render the application title on the left and the view tabs on the right.
pub fn render_header(frame: &mut Frame, header: HeaderContext<'_>) {
	let HeaderContext {
		title,
		backend_label,
		view,
		ui,
		theme,
		area,
	} = header;
	let tabs_width = calculate_tabs_width(ui);
	let columns = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Min(1), Constraint::Length(tabs_width)])
		.split(area);

	let prompt = Line::from(vec![
		Span::styled(format!("{title} > "), theme.prompt_style()),
		Span::styled(backend_label.to_string(), theme.empty_style()),
	]);
	frame.render_widget(Paragraph::new(prompt), columns[0]);

	let tabs_area = columns[1];
	let tabs_inner = Rect {
		x: tabs_area.x.saturating_add(1),
		width: tabs_area.width.saturating_sub(1),
		..tabs_area
	};
	let tabs = Tabs::new(build_tab_titles(theme, view, ui))
		.select(view.index())
		.divider("")
		.padding("", " ")
		.highlight_style(theme.tab_highlight_style());
	frame.render_widget(tabs, tabs_inner);
}

fn build_tab_titles(theme: &Theme, view: View, ui: &UiConfig) -> Vec<Line<'static>> {
	let active = theme.header_style();
	let inactive = theme.tab_inactive_style();
	ui.tab_labels()
		.enumerate()
		.map(|(index, label)| {
			let style = if index == view.index() {
				active
			} else {
				inactive
			};
			Line::from(format!(" {label} ")).style(style)
		})
		.collect()
}

fn calculate_tabs_width(ui: &UiConfig) -> u16 {
	let width: usize = ui.tab_labels().map(|label| label.width() + 3).sum();
	u16::try_from(width).unwrap_or(u16::MAX).max(12)
}
