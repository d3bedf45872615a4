/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod analyze;
pub mod enrich;
pub mod placeholder;
pub mod query;
pub mod setup;

use crate::cli::Command;
use crate::pipeline::{CliError, Pipeline};

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `CliError` on any command failure.
pub fn dispatch(command: &Command, pipeline: &mut Pipeline<'_>) -> Result<(), CliError> {
    match command {
        Command::Enrich(args) => enrich::run(args, pipeline),
        Command::Analyze(args) => analyze::run(args, pipeline),
        Command::Query(args) => query::run(args, pipeline),
        Command::Setup(args) => setup::run(args, pipeline),
        Command::Hunt(args) | Command::Feedback(args) => {
            placeholder::run(command.name(), args, pipeline)
        }
    }
}
