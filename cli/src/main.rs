//! CLI entrypoint for kragentic-parliament
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use parliament_application::{DecisionLogger, NoDecisionLogger, Parliament};
use parliament_domain::{DeliberationContext, OutputFormat};
use parliament_infrastructure::{ConfigLoader, ContextFileLoader, FileConfig, JsonlDecisionLogger};
use parliament_presentation::{Cli, ConsoleFormatter, ConsoleProgress};
use std::io::{BufRead, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{e}"))?
    };

    let log_file = cli.log_file.as_ref().or(config.logging.log_file.as_ref());
    let _guard = init_tracing(cli.verbose, log_file.map(|p| p.as_path()))?;
    info!("Starting kragentic-parliament");

    report_config_issues(&config)?;

    let color = config.output.color && std::io::stdout().is_terminal();
    colored::control::set_override(color);

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let context = match &cli.context {
        Some(path) => ContextFileLoader::new()
            .load(path)
            .with_context(|| format!("loading context from {}", path.display()))?,
        None => DeliberationContext::new(),
    };

    let logger: Arc<dyn DecisionLogger> =
        match cli.decision_log.as_ref().or(config.logging.decision_log.as_ref()) {
            Some(path) => match JsonlDecisionLogger::new(path) {
                Some(logger) => Arc::new(logger),
                None => bail!("could not open decision log {}", path.display()),
            },
            None => Arc::new(NoDecisionLogger),
        };

    let mut parliament = Parliament::new(config.to_params()).with_decision_logger(logger);

    let queries = collect_queries(cli.queries)?;
    let show_progress = !cli.quiet && config.output.show_progress;

    for query in &queries {
        let (_, trace) = if show_progress {
            parliament.deliberate_with_progress(query, &context, &ConsoleProgress)?
        } else {
            parliament.deliberate(query, &context)?
        };

        println!("{}", ConsoleFormatter::render(&trace, format));
    }

    if cli.stats {
        println!(
            "{}",
            ConsoleFormatter::format_statistics(&parliament.evaluator_statistics())
        );
    }

    Ok(())
}

/// Initialize logging based on verbosity level, optionally into a file
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path {} has no file name", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("creating log directory {}", directory.display()))?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Print every config issue; abort if any is an error
fn report_config_issues(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("invalid configuration");
    }
    Ok(())
}

/// Queries from the command line, or one per line from piped stdin
fn collect_queries(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("at least one query is required; pass it as an argument or pipe it on stdin");
    }

    let mut queries = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("reading queries from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            queries.push(line.to_string());
        }
    }
    if queries.is_empty() {
        bail!("no queries found on stdin");
    }
    Ok(queries)
}
