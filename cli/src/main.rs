//! CLI entrypoint for noire
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod restart;

use anyhow::{Context, Result, bail};
use clap::Parser;
use noire_application::{
    CaseContentProvider, ConversationLogger, NoConversationLogger, ProviderError,
    SessionController, SessionStore,
};
use noire_infrastructure::{
    ChatCompletionsConfig, ChatCompletionsProvider, ConfigLoader, FileConfig,
    InMemorySessionStore, JsonFileSessionStore, JsonlConversationLogger, OfflineProvider,
    ProviderKind,
};
use noire_presentation::{Cli, GameRepl, StartMode};
use restart::ReexecRestartHandler;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting noire");

    // === Dependency Injection ===
    let provider = build_provider(&cli, &config)?;
    let store = build_store(&cli, &config);
    let transcript = build_transcript(&cli, &config);
    let restart = ReexecRestartHandler::new();

    let controller = SessionController::new(provider, store)
        .with_rules(config.game.to_game_rules())
        .with_restart_handler(Arc::new(restart.clone()))
        .with_conversation_logger(transcript);

    let mode = if cli.new {
        StartMode::New
    } else {
        StartMode::ResumeOrNew
    };

    GameRepl::new(controller)
        .with_progress(!cli.quiet)
        .with_difficulty(cli.difficulty.map(Into::into))
        .run(mode)
        .await?;

    if restart.is_requested() {
        info!("Restarting noire");
        // Flush buffered file logs before this process image is replaced
        drop(_log_guard);
        ReexecRestartHandler::reexec()?;
    }

    Ok(())
}

/// Install the tracing subscriber. The returned guard must live until exit
/// so buffered file logs are flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = if cli.verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Cannot create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn build_provider(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn CaseContentProvider>> {
    if cli.offline || config.provider.kind == ProviderKind::Offline {
        info!("Using offline case generator");
        let provider = match config.provider.seed {
            Some(seed) => OfflineProvider::with_seed(seed),
            None => OfflineProvider::new(),
        };
        return Ok(Arc::new(provider));
    }

    let chat_config = match ChatCompletionsConfig::from_file_config(&config.provider) {
        Ok(chat_config) => chat_config,
        Err(ProviderError::MissingApiKey(var)) => bail!(
            "No API key found. Set ${} (or provider.api_key in noire.toml), or play with --offline.",
            var
        ),
        Err(e) => return Err(e.into()),
    };
    let provider = ChatCompletionsProvider::new(chat_config)?;
    info!("Using chat model {}", provider.model());
    Ok(Arc::new(provider))
}

fn build_store(cli: &Cli, config: &FileConfig) -> Arc<dyn SessionStore> {
    if cli.ephemeral || config.storage.ephemeral {
        info!("Session is kept in memory only");
        return Arc::new(InMemorySessionStore::new());
    }

    match config.storage.session_path() {
        Some(path) => {
            info!("Saving session to {}", path.display());
            Arc::new(JsonFileSessionStore::new(path))
        }
        None => {
            warn!("No data directory available; the game will not be saved");
            Arc::new(InMemorySessionStore::new())
        }
    }
}

fn build_transcript(cli: &Cli, config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let path = cli
        .transcript
        .clone()
        .or_else(|| config.logging.transcript_file());

    match path.and_then(JsonlConversationLogger::new) {
        Some(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    }
}
