//! Interactive terminal front end.
//!
//! [`run`] owns the request runtime and the terminal. [`App`] holds the
//! [`Controller`](crate::controller::Controller) together with widget state
//! and is drawn once per frame after pending completions are applied.

mod actions;
mod components;
mod config;
mod input;
mod render;
mod runtime;
mod state;
pub mod theme;

pub use config::{PaneUiConfig, UiConfig};
pub use input::QueryInput;
pub use runtime::run;
pub use state::{App, PanelOptions};
pub use theme::Theme;
