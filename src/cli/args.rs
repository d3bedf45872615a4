/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// sublime — enrich, analyze and query email artifacts with the Sublime API.
#[derive(Debug, Parser)]
#[command(
    name = "sublime",
    about = "Enrich, analyze and query email artifacts with the Sublime API",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Include extra detail in text output and raise the log level to info.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Human-readable text, shaped per command.
    Txt,
}

impl OutputFormat {
    /// File extension used when `enrich` has to name its own output file.
    #[must_use]
    pub fn enrich_extension(self) -> &'static str {
        match self {
            Self::Json => "mdm",
            Self::Txt => "txt",
        }
    }
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enrich a raw EML file into a message data model (MDM).
    Enrich(EnrichArgs),
    /// Run detections against an EML or enriched MDM file.
    Analyze(AnalyzeArgs),
    /// Run a raw query against an enriched MDM file.
    Query(QueryArgs),
    /// Save the API key to the configuration file.
    Setup(SetupArgs),
    /// Hunt across historical messages (not available yet).
    Hunt(PlaceholderArgs),
    /// Send feedback on a detection result (not available yet).
    Feedback(PlaceholderArgs),
}

impl Command {
    /// Command identity used for formatter lookup and logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enrich(_) => "enrich",
            Self::Analyze(_) => "analyze",
            Self::Query(_) => "query",
            Self::Setup(_) => "setup",
            Self::Hunt(_) => "hunt",
            Self::Feedback(_) => "feedback",
        }
    }
}

/// Arguments for `sublime enrich`.
#[derive(Debug, Parser)]
pub struct EnrichArgs {
    /// Key to include in API requests.
    #[arg(short = 'k', long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Input EML file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file, or `-` for stdout. Defaults to the input file name in the
    /// current directory with a .mdm (json) or .txt (txt) extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_name = "FORMAT", default_value = "json")]
    pub format: OutputFormat,
}

/// Arguments for `sublime analyze`.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Key to include in API requests.
    #[arg(short = 'k', long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Input EML or enriched MDM file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Detections file [default: detections.pql].
    #[arg(short = 'D', long = "detections", value_name = "FILE")]
    pub detections_file: Option<PathBuf>,

    /// Raw detection, run instead of a detections file. Surround it with
    /// single quotes.
    #[arg(short = 'd', long, value_name = "DETECTION", conflicts_with = "detections_file")]
    pub detection: Option<String>,

    /// Output file, or `-` for stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_name = "FORMAT", default_value = "txt")]
    pub format: OutputFormat,
}

/// Arguments for `sublime query`.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Key to include in API requests.
    #[arg(short = 'k', long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Enriched MDM file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Raw query, surrounded by single quotes.
    #[arg(short, long, value_name = "QUERY")]
    pub query: String,

    /// Output file, or `-` for stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_name = "FORMAT", default_value = "txt")]
    pub format: OutputFormat,
}

/// Arguments for `sublime setup`.
#[derive(Debug, Parser)]
pub struct SetupArgs {
    /// API key to save.
    #[arg(short = 'k', long, value_name = "KEY")]
    pub api_key: String,

    /// Override the API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Arguments shared by subcommands that only check availability with the API.
#[derive(Debug, Parser)]
pub struct PlaceholderArgs {
    /// Key to include in API requests.
    #[arg(short = 'k', long, value_name = "KEY")]
    pub api_key: Option<String>,
}
