// Rust guideline compliant 2026-02-06

//! gviz CLI Application
//!
//! Assembles a chart data source response from the command line.

use anyhow::Context;
use clap::Parser;
use gviz_cli::{create_formatter, parse_message_spec, read_table};
use gviz_core::config::CONFIG_FILE_NAME;
use gviz_core::{Config, MessageKind, RequestDescriptor, RequestOverrides, ResponseContainer};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(
    name = "gviz",
    version,
    about = "Assemble chart data source responses",
    long_about = "Builds the body and headers of a chart data source response from a request descriptor, caller messages and a pre-serialized table. Diagnostics go to stderr; the response goes to stdout.",
    after_help = "Examples:\n  gviz --tqx 'reqId=7' --table table.js\n  gviz --tqx 'reqId=1;out=csv' --auth\n  gviz --error 'access_denied:Not allowed' --warning data_truncated\n"
)]
struct Cli {
    /// Request descriptor (key=value;key=value)
    #[arg(long, default_value = "")]
    tqx: String,

    /// Treat the request as carrying the data source auth header
    #[arg(long)]
    auth: bool,

    /// Request id, overrides the descriptor
    #[arg(long, allow_hyphen_values = true)]
    req_id: Option<i64>,

    /// Protocol version, overrides the descriptor
    #[arg(long)]
    version_override: Option<String>,

    /// Response handler name, overrides the descriptor
    #[arg(long)]
    handler: Option<String>,

    /// Output format, overrides the descriptor
    #[arg(long)]
    out: Option<String>,

    /// Freshness signature, overrides the descriptor
    #[arg(long)]
    sig: Option<String>,

    /// Download file name, overrides the descriptor
    #[arg(long)]
    out_file_name: Option<String>,

    /// Pre-serialized table file ('-' for stdin)
    #[arg(long)]
    table: Option<String>,

    /// Add an error (reason[:summary[:detail]])
    #[arg(long)]
    error: Vec<String>,

    /// Add a warning (reason[:summary[:detail]])
    #[arg(long)]
    warning: Vec<String>,

    /// Custom config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Print only the body
    #[arg(long)]
    body_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load(Path::new(CONFIG_FILE_NAME)),
    }
    .context("Failed to load configuration")?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level)?;

    let overrides = RequestOverrides {
        request_id: cli.req_id,
        version: cli.version_override.clone(),
        signature: cli.sig.clone(),
        output_format: cli.out.clone(),
        response_handler: cli.handler.clone(),
        out_file_name: cli.out_file_name.clone(),
    };
    let request = RequestDescriptor::parse(&cli.tqx, cli.auth, overrides);
    let mut container = ResponseContainer::new(request);

    for spec in &cli.error {
        container.push_message(parse_message_spec(MessageKind::Error, spec)?);
    }
    for spec in &cli.warning {
        container.push_message(parse_message_spec(MessageKind::Warning, spec)?);
    }
    if let Some(path) = &cli.table {
        let table =
            read_table(path).with_context(|| format!("Failed to read table from {}", path))?;
        container.set_data_payload(table);
    }

    let response = container.assemble_with(&config);

    for message in response.message_log.iter() {
        info!(
            kind = message.kind.as_str(),
            reason = %message.reason,
            summary = message.summary.as_deref().unwrap_or(""),
            detail = message.detail.as_deref().unwrap_or(""),
            "diagnostic message"
        );
    }
    if response.message_log.has_errors() {
        warn!(
            status = response.status.as_str(),
            req_id = container.request().request_id(),
            errors = response.message_log.errors().len(),
            "response assembled with errors"
        );
    } else {
        info!(
            status = response.status.as_str(),
            req_id = container.request().request_id(),
            "response assembled"
        );
    }

    let formatter = create_formatter(cli.body_only);
    println!("{}", formatter.format_response(&response));

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let level = parse_log_level(level)?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => anyhow::bail!("Invalid log level: {}", other),
    }
}
