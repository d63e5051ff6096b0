//! CLI entrypoint for decision-log
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::Parser;
use decision_log_application::{
    DecisionFrame, InspectLogInput, InspectLogUseCase, WatchDecisionLogUseCase,
};
use decision_log_domain::OutputFormat as FrameFormat;
use decision_log_infrastructure::{ConfigLoader, FileConfig, JsonlEventSource};
use decision_log_presentation::{
    Cli, ConsoleFormatter, LiveReporter, OutputConfig, OutputFormatter, SimpleProgress,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let file_config = load_config(&cli)?;
    let engine = file_config.to_engine_config()?;
    let mut params = file_config.to_watch_params();
    if cli.follow {
        params = params.with_follow(true);
    }
    let output = OutputConfig::new(file_config.output.format, file_config.output.color).with_cli(
        cli.output,
        cli.no_color,
        cli.quiet,
    );
    output.apply_color();

    let Some(log) = cli.log.as_ref() else {
        bail!("LOG is required. Pass the path to a JSONL event log.");
    };

    // === Dependency Injection ===
    let source = Arc::new(JsonlEventSource::new(log));
    info!("Reading decision log {}", source.path().display());
    let commands = cli.cursor_commands();

    if cli.now.is_some() && cli.watches() {
        warn!("--now is ignored while watching");
    }

    let frame: DecisionFrame = if cli.watches() {
        let cancellation = CancellationToken::new();
        let on_interrupt = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });

        let use_case =
            WatchDecisionLogUseCase::new(source, engine, params).with_cancellation(cancellation);

        // JSON output stays machine-readable on stdout; progress goes to stderr
        if output.show_progress && output.format != FrameFormat::Json {
            use_case
                .execute_with_observer(&commands, &LiveReporter::new())
                .await?
        } else if output.show_progress {
            use_case
                .execute_with_observer(&commands, &SimpleProgress)
                .await?
        } else {
            use_case.execute(&commands).await?
        }
    } else {
        let input = InspectLogInput::new(cli.now.unwrap_or_else(Utc::now)).with_commands(commands);
        InspectLogUseCase::new(source, engine)
            .execute(input)
            .await
            .with_context(|| format!("Failed to inspect {}", log.display()))?
    };

    println!("{}", ConsoleFormatter.render(&frame, output.format));

    Ok(())
}

/// Install the tracing subscriber: verbosity from `-v`, optional file sink.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
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

/// Load and validate configuration, honoring `--no-config`.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            error!("{}", issue);
        }
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    Ok(config)
}
