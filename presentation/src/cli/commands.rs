//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every perspective, metrics and lineage
    Full,
    /// Only the decision and its confidence
    Decision,
    /// The decision trace as JSON
    Json,
}

impl From<OutputFormat> for parliament_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => parliament_domain::OutputFormat::Full,
            OutputFormat::Decision => parliament_domain::OutputFormat::Decision,
            OutputFormat::Json => parliament_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for kragentic-parliament
#[derive(Parser, Debug)]
#[command(name = "parliament")]
#[command(author, version, about = "Rule-based parliament of perspectives that deliberates on a query")]
#[command(long_about = r#"
The parliament weighs a query through six perspectives and a synthesis:

  Reality         grounding in current skills and constraints
  Causality       consequences and trajectory
  Equilibrium     balance between competing options
  Transformation  learning and change
  Simulation      future scenarios
  Memory          history and recurring patterns
  Synthesis       integrates the active perspectives into a decision

Each perspective scores the query with a fixed rule ladder. Perspectives
scoring at or above their threshold are active and contribute a response.
When the perspectives disagree strongly, Equilibrium is consulted again.
Every deliberation yields a decision trace with confidence, alignment and
pattern flags.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./parliament.toml      Project-level config
3. ~/.config/kragentic-parliament/config.toml   Global config

Example:
  parliament "Should we migrate the billing service to Rust?"
  parliament --context profile.toml -o full "Should I take the platform role?"
  parliament --stats "What caused the outage?" "Should we change on-call?"
"#)]
pub struct Cli {
    /// Queries to deliberate, in order, sharing one decision history
    #[arg(value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Context file (JSON or TOML) with facts for the perspectives
    #[arg(long, value_name = "PATH")]
    pub context: Option<PathBuf>,

    /// Output format (defaults to the configured format, else decision)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print per-evaluator statistics after all queries
    #[arg(long)]
    pub stats: bool,

    /// Append every decision trace to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub decision_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
