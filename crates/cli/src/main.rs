use std::path::PathBuf;

use anyhow::{Context, Result};
use checklist::{TaskRegistry, TaskStore};
use clap::{Parser, Subcommand};
use common::{logging, AppConfig, ErrorLog};
use console::style;
use llm::{ChecklistGenerator, OpenAiClient};
use tracing::info;
use ui::TuiApp;

mod notify;

#[derive(Parser)]
#[command(name = "ticklist")]
#[command(about = "Checklist application with AI roadmap generation")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the task list and exit
    List,
    /// Append a task and exit
    Add {
        /// Task text
        text: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Missing or malformed configuration is fatal before any UI exists.
    let config = AppConfig::load(&cli.config)?;
    logging::init(&config.app_log_file)?;
    info!(config = %cli.config.display(), "starting ticklist");

    let error_log = ErrorLog::new(config.error_log_file.clone());
    let store = TaskStore::new(config.data_file.clone());

    match cli.command {
        Some(Commands::List) => list_tasks(&store, &error_log),
        Some(Commands::Add { text }) => add_task(&store, &error_log, &text.join(" ")),
        None => run_tui(config, store, error_log),
    }
}

/// Load the registry, degrading to an empty list on unreadable data. The
/// failure is recorded and handed back for the caller to surface.
fn load_registry(store: &TaskStore, error_log: &ErrorLog) -> (TaskRegistry, Option<String>) {
    match store.load() {
        Ok(tasks) => (TaskRegistry::new(tasks), None),
        Err(err) => {
            let err = anyhow::Error::new(err);
            error_log.record("load tasks", &err);
            (
                TaskRegistry::default(),
                Some(error_log.dialog_message("Failed to load tasks")),
            )
        }
    }
}

fn list_tasks(store: &TaskStore, error_log: &ErrorLog) -> Result<()> {
    let (registry, load_error) = load_registry(store, error_log);
    if let Some(message) = load_error {
        eprintln!("{}", style(message).red());
    }

    if registry.is_empty() {
        println!("{}", style("no tasks yet").dim());
        return Ok(());
    }
    for line in registry.render_lines() {
        println!("{line}");
    }
    Ok(())
}

fn add_task(store: &TaskStore, error_log: &ErrorLog, text: &str) -> Result<()> {
    let (mut registry, load_error) = load_registry(store, error_log);
    if let Some(message) = load_error {
        eprintln!("{}", style(message).red());
    }

    if registry.add(text).is_none() {
        eprintln!("{}", style("empty task ignored").yellow());
        return Ok(());
    }

    if let Err(err) = store.save(registry.tasks()) {
        let err = anyhow::Error::new(err);
        error_log.record("save tasks", &err);
        return Err(err.context(error_log.dialog_message("Failed to save tasks")));
    }

    println!("{} {}", style("added:").green(), text.trim());
    Ok(())
}

fn run_tui(config: AppConfig, store: TaskStore, error_log: ErrorLog) -> Result<()> {
    let (registry, load_error) = load_registry(&store, &error_log);

    let client = OpenAiClient::new(config.api_key.clone(), config.model.clone(), config.endpoint.clone())?;
    let generator = ChecklistGenerator::new(client);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    // Fire the reminder before the terminal enters raw mode.
    if config.notify_on_startup {
        notify::send_startup_reminder(&error_log);
    }

    let app = TuiApp::new(
        registry,
        store,
        error_log,
        generator,
        runtime.handle().clone(),
        config.generate_once,
    )?;
    let mut app = match load_error {
        Some(message) => app.with_startup_error(message),
        None => app,
    };
    app.run()
}
