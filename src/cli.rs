use clap::Parser;
use rambo::application::dto::OutputFormat;
use std::path::PathBuf;

/// Order conda recipes for building and cull those already in a channel
#[derive(Parser, Debug)]
#[command(name = "rambo")]
#[command(version)]
#[command(about = "Order conda recipes for building and cull those already in a channel", long_about = None)]
pub struct Args {
    /// Directory holding one subdirectory per recipe
    #[arg(value_name = "RECIPES_DIR")]
    pub recipes_dir: PathBuf,

    /// Emit only recipes whose artifacts are missing from the channel
    #[arg(short = 'c', long)]
    pub culled: bool,

    /// Emit the details table (alias for --format details)
    #[arg(short = 'd', long, conflicts_with = "format")]
    pub details: bool,

    /// Output format: text, details or json [default: text]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// YAML manifest restricting the recipe set and naming the channel
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Channel URL (http, https or file) or local channel directory
    #[arg(long, value_name = "LOCATION")]
    pub channel: Option<String>,

    /// Channel subdirectory, e.g. linux-64 [default: host platform]
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Exclude recipes matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "python" -e "py*-dev"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Path to a config file (defaults to rambo.config.yml in RECIPES_DIR)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The format requested on the command line, if any
    pub fn requested_format(&self) -> Option<OutputFormat> {
        if self.details {
            Some(OutputFormat::Details)
        } else {
            self.format
        }
    }
}
