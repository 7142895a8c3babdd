//! Configuration loading and resolution.
//!
//! `load` layers config files, environment variables, and CLI flags into a
//! [`ResolvedConfig`] that the binary hands to the panel or a headless command.

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
