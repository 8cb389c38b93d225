use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod config;
mod quote_store;
mod remote;
mod session;

use app::App;
use commands::{
    ConfigCommand, DashboardCommand, LoginCommand, MealCommand, MusicCommand, NoteCommand,
    SettingsCommand, SignupCommand, StudyCommand, TaskCommand, WaterCommand, WhoamiCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "zenith")]
#[command(version)]
#[command(about = "Personal organizer: routine, hydration, meals, notes, study and music", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login(LoginCommand),

    /// Create an account
    Signup(SignupCommand),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami(WhoamiCommand),

    /// Show today's summary and the quote of the day
    Dashboard(DashboardCommand),

    /// Track water intake and reminders
    Water(WaterCommand),

    /// Manage daily and weekly tasks
    Task(TaskCommand),

    /// Plan meals and build the shopping list
    Meal(MealCommand),

    /// Manage notes
    Note(NoteCommand),

    /// Track study subjects and sessions
    Study(StudyCommand),

    /// Track music practice
    Music(MusicCommand),

    /// Profile and appearance settings
    Settings(SettingsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(execute_command(cli.command, &config, cli_config_path))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zenith=warn,zenith_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Commands that read or change the user's state open an [`App`], which
/// loads the state first and flushes the pending remote write at the end.
async fn execute_command(
    command: Option<Commands>,
    config: &Config,
    cli_config_path: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    match command {
        Some(Commands::Login(cmd)) => cmd.run(config).await?,
        Some(Commands::Signup(cmd)) => cmd.run(config).await?,
        Some(Commands::Logout) => commands::logout(config).await?,
        Some(Commands::Whoami(cmd)) => cmd.run(config)?,
        Some(Commands::Config(cmd)) => cmd.run(config, cli_config_path)?,
        Some(Commands::Dashboard(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app, config).await;
            app.finish().await;
            result?;
        }
        Some(Commands::Study(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app, config).await;
            app.finish().await;
            result?;
        }
        Some(Commands::Water(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app);
            app.finish().await;
            result?;
        }
        Some(Commands::Task(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app);
            app.finish().await;
            result?;
        }
        Some(Commands::Meal(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app);
            app.finish().await;
            result?;
        }
        Some(Commands::Note(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app);
            app.finish().await;
            result?;
        }
        Some(Commands::Music(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app);
            app.finish().await;
            result?;
        }
        Some(Commands::Settings(cmd)) => {
            let app = App::open(config).await?;
            let result = cmd.run(&app);
            app.finish().await;
            result?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
