/// Subcommands the client exposes but does not implement yet.
///
/// They still authenticate and ask the API, so the server decides whether
/// the feature exists.
use crate::api::ApiError;
use crate::cli::args::PlaceholderArgs;
use crate::pipeline::{CliError, Pipeline, classify_error};

/// Run a placeholder subcommand named `name`.
///
/// # Errors
///
/// Returns `CliError::NotImplemented` when the availability check is rejected, or a
/// classified `CliError::Api` for any other failure.
pub fn run(name: &str, args: &PlaceholderArgs, pipeline: &mut Pipeline<'_>) -> Result<(), CliError> {
    let api = pipeline.connect(args.api_key.as_deref())?;
    match api.not_implemented(name) {
        Ok(_) => Ok(()),
        Err(ApiError::RequestFailed { status, .. }) => {
            tracing::debug!(status, name, "availability check rejected");
            Err(CliError::NotImplemented {
                name: name.to_owned(),
            })
        }
        Err(other) => Err(classify_error(other)),
    }
}
