//! Terminal control panel for a retrieval-augmented generation backend.
//!
//! The [`controller`] owns the interaction state (file selection, query,
//! results, document list) and drives requests through a
//! [`ragdeck_backend::Backend`]. The [`ui`] module renders that state with
//! ratatui, [`presentation`] turns an indexed document into display panels,
//! and [`headless`] runs single operations for the command line.

pub mod app_dirs;
pub mod controller;
pub mod headless;
pub mod logging;
pub mod picker;
pub mod presentation;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use controller::{Controller, OperationKind, Submission, View};
pub use picker::{FilePicker, PickerOptions};
pub use presentation::DocumentView;
pub use ui::{PanelOptions, Theme, run};
