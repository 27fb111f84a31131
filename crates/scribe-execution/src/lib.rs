//! Runtime wiring for Scribe: logging setup and the composition root.

pub mod bootstrap;
pub mod logging;
pub mod tracing_layer;

pub use bootstrap::{BootstrapOptions, WorkshopBootstrap, bootstrap, bootstrap_with_service};
pub use tracing_layer::{LogEvent, LogEventLayer};
