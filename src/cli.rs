use crate::config::{CliOverrides, Config, MalformedPolicy};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "halltab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect Hall Effect measurement reports into one CSV table")]
#[command(
    long_about = "HallTab reads every HMS-3000 .txt report in a directory, pulls the current, \
                  bulk concentration, mobility and sheet concentration out of each, and writes \
                  one row per report to a CSV table inside that directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    halltab ./measurements\n  \
    halltab ./measurements --output-name run42.csv\n  \
    halltab ./measurements --on-malformed abort -v\n  \
    halltab ./measurements --output-format json --quiet")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Directory holding the measurement reports
    #[arg(required_unless_present = "generate_config")]
    pub directory: Option<PathBuf>,

    /// File name of the CSV table written inside DIRECTORY (default: output.csv)
    #[arg(short, long)]
    pub output_name: Option<String>,

    /// What to do with a report whose marker is not followed by enough data
    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedPolicy>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be read without writing the table)
    #[arg(long, help = "List the reports that would be read without writing the table")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_name(self.output_name.clone())
            .with_on_malformed(self.on_malformed)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
