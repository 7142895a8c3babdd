//! Widgets composed by [`App::draw`](super::App).

pub mod documents;
pub mod search;
pub mod status;
pub mod tabs;
pub mod upload;

pub use documents::render_documents;
pub use search::render_search;
pub use status::{StatusContext, render_status};
pub use tabs::{HeaderContext, render_header};
pub use upload::render_upload;
