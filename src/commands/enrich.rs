/// `enrich` command: turn a raw EML into a message data model.
use std::path::Path;

use serde_json::Value;

use crate::api::Artifact;
use crate::cli::args::EnrichArgs;
use crate::cli::{OutputFormat, OutputSink};
use crate::pipeline::{CliError, Pipeline, classify, read_input};

/// Run `sublime enrich`.
///
/// The detail view always goes to stdout. The MDM goes to `-o` if given
/// (`-` is stdout), else to a file named after the input.
///
/// # Errors
///
/// Returns `CliError` on unreadable input, missing key, API failure, or if the
/// response lacks `message_data_model`.
pub fn run(args: &EnrichArgs, pipeline: &mut Pipeline<'_>) -> Result<(), CliError> {
    let artifact = Artifact::from_contents(read_input("-i", &args.input)?);

    let api = pipeline.connect(args.api_key.as_deref())?;
    let result = classify(api.enrich(&artifact))?;

    let sink = match &args.output {
        Some(path) => OutputSink::from_arg(Some(path)),
        None => OutputSink::File(pipeline.workdir_path(&output_file_name(&args.input, args.format))),
    };

    // Details are rendered from the full composite, before narrowing.
    let details = pipeline.render(OutputFormat::Txt, "enrich_details", &result)?;
    pipeline.echo(&details)?;

    let mdm = message_data_model(result)?;
    let rendered = pipeline.render(args.format, "enrich", &mdm)?;
    pipeline.emit(&rendered, &sink)
}

/// `<input stem>.mdm` for json, `<input stem>.txt` for txt.
#[must_use]
pub fn output_file_name(input: &Path, format: OutputFormat) -> String {
    let stem = input
        .file_stem()
        .map_or_else(|| "message".into(), |s| s.to_string_lossy());
    format!("{stem}.{}", format.enrich_extension())
}

fn message_data_model(mut result: Value) -> Result<Value, CliError> {
    result
        .get_mut("message_data_model")
        .map(Value::take)
        .ok_or_else(|| {
            CliError::MalformedResponse("enrich response has no message_data_model".to_owned())
        })
}
