use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_OUTPUT_FILE: &str = "data.yml";

/// Freeze cumulative counters into a Prometheus recording-rule file.
#[derive(Parser, Debug, Clone)]
#[command(name = "counter-rebase", version, about)]
pub struct Cli {
    /// Prometheus base URL including scheme and port, e.g. http://prometheus:9090
    #[arg(short, long, required_unless_present = "print_schema")]
    pub server: Option<String>,

    /// Unix timestamp (seconds) to evaluate the counters at. Defaults to now.
    #[arg(short, long)]
    pub time: Option<i64>,

    /// Where to write the rule file. An existing file is replaced.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Optional YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print the JSON schema of the configuration file and exit.
    #[arg(long)]
    pub print_schema: bool,
}
