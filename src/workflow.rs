use std::sync::Arc;

use anyhow::{Context, Result};
use ragdeck::headless::Session;
use ragdeck::picker::handles_from_paths;
use ragdeck::{PanelOptions, ui};
use ragdeck_backend::{Backend, HttpBackend};

use crate::cli::{Action, Report};
use crate::settings::ResolvedConfig;

/// Turns the resolved configuration into either the panel or one headless command.
pub(crate) struct Workflow {
	config: ResolvedConfig,
	backend: Arc<dyn Backend>,
}

impl Workflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let backend = HttpBackend::new(config.backend_url.as_str())
			.with_context(|| format!("failed to build the HTTP client for {}", config.backend_url))?;
		Ok(Self {
			config,
			backend: Arc::new(backend),
		})
	}

	/// Run the interactive panel until the user quits.
	pub(crate) fn run_panel(self) -> Result<()> {
		let ResolvedConfig {
			backend_url,
			result_count,
			theme,
			start_view,
			picker,
			..
		} = self.config;

		let options = PanelOptions {
			theme,
			start_view,
			result_count,
			picker,
			backend_label: backend_url.to_string(),
			..PanelOptions::default()
		};
		ui::run(self.backend, options)
	}

	/// Run one operation to completion and describe its outcome.
	pub(crate) fn run_action(self, action: Action) -> Result<Report> {
		let mut session = Session::new(self.backend)?;
		match action {
			Action::Upload { files } => {
				let files = handles_from_paths(&files)?;
				let receipt = session.upload(files.clone())?;
				Ok(Report::Upload { files, receipt })
			}
			Action::Search { query } => {
				let result_count = self.config.result_count;
				let results = session.search(&query, result_count)?;
				Ok(Report::Search {
					query,
					result_count,
					results,
				})
			}
			Action::Documents => Ok(Report::Documents {
				documents: session.documents()?,
			}),
			Action::Health => Ok(Report::Health {
				backend: self.config.backend_url.to_string(),
				status: session.health()?,
			}),
		}
	}
}
