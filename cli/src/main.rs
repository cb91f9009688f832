//! CLI entrypoint for NyayBuddy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use nyay_application::ports::intake_progress::{IntakeProgressNotifier, NoIntakeProgress};
use nyay_application::IntakeSession;
use nyay_infrastructure::{ConfigLoader, HttpInferenceGateway, JsonlConversationLogger};
use nyay_presentation::{Cli, ConsoleFormatter, IntakeRepl, IntakeSpinner, OutputFormat};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!(e))?
    };

    // CLI flags override file-config UI settings
    let mut settings = config.ui;
    if let Some(language) = &cli.language {
        settings.language = language.parse().map_err(|e: String| anyhow!(e))?;
    }
    if let Some(theme) = &cli.theme {
        settings.theme = theme.parse().map_err(|e: String| anyhow!(e))?;
    }

    info!("Starting NyayBuddy intake");

    // === Dependency Injection ===
    let gateway = Arc::new(HttpInferenceGateway::new(&config.gateway));

    let log_path = match cli.log_conversation.clone() {
        // Bare --log-conversation picks a per-session default path
        Some(None) => JsonlConversationLogger::default_session_path(),
        Some(Some(path)) => Some(path),
        None => config.logging.conversation_log.clone(),
    };
    let logger = log_path.and_then(|path| JsonlConversationLogger::new(path).map(Arc::new));
    if let Some(logger) = &logger {
        info!("Writing session transcript to {}", logger.path().display());
    }

    // Interactive mode (also the default when no description is given)
    if cli.interactive || cli.description.is_none() {
        let mut repl = IntakeRepl::new(gateway, settings)
            .with_progress(!cli.quiet)
            .with_detailed(!cli.skip_followup);
        if let Some(logger) = logger {
            repl = repl.with_conversation_logger(logger);
        }
        repl.run().await?;
        return Ok(());
    }

    // One-shot mode: classify the description and print the result
    let Some(description) = cli.description else {
        bail!("A case description is required. Use --interactive for the guided flow.");
    };

    let mut session = IntakeSession::new(gateway);
    if let Some(logger) = logger {
        session = session.with_conversation_logger(logger);
    }

    let spinner = IntakeSpinner::new();
    let progress: &dyn IntakeProgressNotifier = if cli.quiet {
        &NoIntakeProgress
    } else {
        &spinner
    };

    session.submit_description(&description, progress).await?;

    let Some(analysis) = session.analysis() else {
        bail!("The gateway returned no analysis");
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format_initial(analysis, None, &settings),
        OutputFormat::Summary => ConsoleFormatter::format_initial_summary(analysis, &settings),
        OutputFormat::Json => ConsoleFormatter::format_json(analysis),
    };

    println!("{}", output);

    Ok(())
}
