use crate::controller::View;

/// Labels for one of the panel's views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneUiConfig {
	pub tab_label: String,
	pub title: String,
	pub hint: String,
}

impl PaneUiConfig {
	#[must_use]
	pub fn new(
		tab_label: impl Into<String>,
		title: impl Into<String>,
		hint: impl Into<String>,
	) -> Self {
		Self {
			tab_label: tab_label.into(),
			title: title.into(),
			hint: hint.into(),
		}
	}
}

/// Text used when rendering tab labels, pane titles, and key hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
	pub app_title: String,
	panes: [PaneUiConfig; 3],
}

impl Default for UiConfig {
	fn default() -> Self {
		Self {
			app_title: "ragdeck".into(),
			panes: [
				PaneUiConfig::new(
					"Upload",
					"PDF files",
					"space mark · a all · enter select · u upload · r rescan · c clear",
				),
				PaneUiConfig::new(
					"Search",
					"Results",
					"enter search · ↑/↓ result count · pgup/pgdn scroll",
				),
				PaneUiConfig::new(
					"Documents",
					"Indexed documents",
					"↑/↓ choose · r refresh · pgup/pgdn scroll",
				),
			],
		}
	}
}

impl UiConfig {
	#[must_use]
	pub fn pane(&self, view: View) -> &PaneUiConfig {
		&self.panes[view.index()]
	}

	pub fn pane_mut(&mut self, view: View) -> &mut PaneUiConfig {
		&mut self.panes[view.index()]
	}

	/// Tab labels in view order.
	pub fn tab_labels(&self) -> impl Iterator<Item = &str> {
		self.panes.iter().map(|pane| pane.tab_label.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn panes_follow_view_order() {
		let ui = UiConfig::default();
		let labels: Vec<_> = ui.tab_labels().collect();
		assert_eq!(labels, ["Upload", "Search", "Documents"]);
		assert_eq!(ui.pane(View::Documents).title, "Indexed documents");
	}

	#[test]
	fn pane_mut_overrides_a_single_view() {
		let mut ui = UiConfig::default();
		ui.pane_mut(View::Search).tab_label = "Ask".into();
		assert_eq!(ui.pane(View::Search).tab_label, "Ask");
		assert_eq!(ui.pane(View::Upload).tab_label, "Upload");
	}
}
