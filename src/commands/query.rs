/// `query` command: run a raw query against an enriched MDM.
use crate::api::Artifact;
use crate::cli::OutputSink;
use crate::cli::args::QueryArgs;
use crate::pipeline::{CliError, Pipeline, classify, read_input};

/// Run `sublime query`.
///
/// # Errors
///
/// Returns `CliError` on unreadable input, missing key, or API failure.
pub fn run(args: &QueryArgs, pipeline: &mut Pipeline<'_>) -> Result<(), CliError> {
    let artifact = Artifact::from_contents(read_input("-i", &args.input)?);

    let api = pipeline.connect(args.api_key.as_deref())?;
    let result = classify(api.query(&artifact, &args.query))?;

    let rendered = pipeline.render(args.format, "query", &result)?;
    pipeline.emit(&rendered, &OutputSink::from_arg(args.output.as_deref()))
}
