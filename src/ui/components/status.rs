use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::controller::{Controller, OperationKind};
use crate::ui::state::Notice;
use crate::ui::theme::Theme;

/// Argument bundle for the two-line status area.
pub struct StatusContext<'a> {
	pub controller: &'a Controller,
	pub notice: Option<&'a Notice>,
	pub hint: &'a str,
	pub theme: &'a Theme,
	pub throbber_state: &'a ThrobberState,
	pub area: Rect,
}

pub fn render_status(frame: &mut Frame, status: StatusContext<'_>) {
	if status.area.height == 0 {
		return;
	}
	let mut lines = vec![status_line(&status)];
	if status.area.height > 1 {
		lines.push(Line::styled(
			format!("{} · tab switch view · esc quit", status.hint),
			status.theme.empty_style(),
		));
	}
	frame.render_widget(Paragraph::new(lines), status.area);
}

fn pending_label(kind: OperationKind) -> &'static str {
	match kind {
		OperationKind::Upload => "uploading",
		OperationKind::Search => "searching",
		OperationKind::Documents => "loading documents",
		OperationKind::Health => "checking backend",
	}
}

/// Pending work first, then the standing error of each kind, then the latest notice.
fn status_line<'a>(status: &StatusContext<'a>) -> Line<'a> {
	let StatusContext {
		controller,
		notice,
		theme,
		throbber_state,
		..
	} = status;
	let mut spans: Vec<Span<'a>> = Vec::new();
	let push_separator = |spans: &mut Vec<Span<'a>>| {
		if !spans.is_empty() {
			spans.push(Span::styled(" · ", theme.empty_style()));
		}
	};

	let pending: Vec<_> = OperationKind::ALL
		.into_iter()
		.filter(|kind| controller.is_pending(*kind))
		.collect();
	if !pending.is_empty() {
		let spinner = Throbber::default()
			.style(theme.prompt_style())
			.throbber_style(theme.prompt_style());
		spans.push(spinner.to_symbol_span(throbber_state));
		let labels: Vec<_> = pending.iter().map(|kind| pending_label(*kind)).collect();
		spans.push(Span::styled(labels.join(", "), theme.prompt_style()));
	}

	for kind in OperationKind::ALL {
		if let Some(message) = controller.last_error(kind) {
			push_separator(&mut spans);
			spans.push(Span::styled(
				format!("{kind} failed: {message}"),
				theme.error_style(),
			));
		}
	}

	if let Some(notice) = notice {
		push_separator(&mut spans);
		spans.push(match notice {
			Notice::Info(text) => Span::styled(text.clone(), theme.success_style()),
			Notice::Warning(text) => Span::styled(text.clone(), theme.highlight_style()),
		});
	}

	if spans.is_empty() {
		spans.push(Span::styled("ready", theme.empty_style()));
	}
	Line::from(spans)
}
