//! Engine: CLI surface and the status check plugged into the pipeline.

pub mod arg_parser;
pub mod cli;
pub mod enrich;
pub mod presenter;

// Re-export commonly used items
pub use arg_parser::{Cli, parse_or_exit, usage_text};
pub use cli::{build_opts, handle_run};
pub use enrich::StatusEnricher;
pub use presenter::{LEGEND, present};
