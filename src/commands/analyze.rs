/// `analyze` command: run detections against an EML or MDM.
use std::fs;
use std::io;
use std::path::Path;

use crate::api::{Artifact, DetectionInput};
use crate::cli::OutputSink;
use crate::cli::args::AnalyzeArgs;
use crate::pipeline::{CliError, Pipeline, classify, read_input};

/// Detections file looked up in the working directory when none is given.
pub const DEFAULT_DETECTIONS_FILE: &str = "detections.pql";

/// Run `sublime analyze`.
///
/// # Errors
///
/// Returns `CliError::MissingDetectionInput` before any API call when there is
/// nothing to run, and `CliError` on unreadable input, missing key, or API failure.
pub fn run(args: &AnalyzeArgs, pipeline: &mut Pipeline<'_>) -> Result<(), CliError> {
    let artifact = Artifact::from_contents(read_input("-i", &args.input)?);
    let detections = detection_input(args, pipeline)?;

    let api = pipeline.connect(args.api_key.as_deref())?;
    let result = classify(api.analyze(&artifact, &detections))?;

    let rendered = pipeline.render(args.format, "analyze", &result)?;
    pipeline.emit(&rendered, &OutputSink::from_arg(args.output.as_deref()))
}

/// `-d`, then `-D`, then the default detections file.
fn detection_input(args: &AnalyzeArgs, pipeline: &Pipeline<'_>) -> Result<DetectionInput, CliError> {
    if let Some(raw) = args.detection.as_deref().filter(|d| !d.is_empty()) {
        return Ok(DetectionInput::Raw(raw.to_owned()));
    }
    if let Some(path) = &args.detections_file {
        return Ok(DetectionInput::Source {
            name: path.display().to_string(),
            source: read_input("-D", path)?,
        });
    }

    let default = pipeline.workdir_path(DEFAULT_DETECTIONS_FILE);
    tracing::debug!(path = %default.display(), "no detections given, trying default");
    read_detections_file(&default)
}

fn read_detections_file(path: &Path) -> Result<DetectionInput, CliError> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(DetectionInput::Source {
            name: path.display().to_string(),
            source,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CliError::MissingDetectionInput),
        Err(e) => Err(CliError::io(path, e)),
    }
}
