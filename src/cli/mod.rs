/// CLI layer: argument parsing and output sinks.
pub mod args;
pub mod output;

pub use args::{Cli, Command, OutputFormat};
pub use output::{OutputSink, write_error};
