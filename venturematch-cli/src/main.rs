//! Main entry point for the VentureMatch command-line client.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::api::ApiClient;
use shared::config::{ClientConfig, ConfigFormat};
use shared::models::{
    Blog, Education, Entrepreneur, Experience, Expertise, InterestAndValue, InvestmentPortfolio,
    Investor, Project,
};
use shared::session::{FileStorage, SessionStore};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::detail::DetailCommand;
use commands::resource::{ListCommand, ResourceCommand};
use commands::session::SessionCommand;

/// `VentureMatch` CLI
#[derive(Parser)]
#[command(name = "venturematch")]
#[command(about = "Command-line client for the VentureMatch platform", long_about = None)]
pub(crate) struct Cli {
    /// Path to a yaml, json or toml configuration file
    #[arg(long, short, global = true, env = "VENTUREMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Backend URL, overriding the configuration file and environment
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the `VentureMatch` CLI
#[derive(Subcommand)]
enum Commands {
    /// Log in, register, log out or inspect the stored session
    #[command(subcommand)]
    Session(SessionCommand),

    /// Manage startup projects
    #[command(subcommand)]
    Projects(ResourceCommand),

    /// Manage blog posts
    #[command(subcommand)]
    Blogs(ResourceCommand),

    /// Manage entrepreneur profiles
    #[command(subcommand)]
    Entrepreneurs(ResourceCommand),

    /// Manage investor profiles
    #[command(subcommand)]
    Investors(ResourceCommand),

    /// Manage investor interests and values
    #[command(subcommand)]
    Interests(ResourceCommand),

    /// Manage investment portfolios
    #[command(subcommand)]
    Portfolios(ResourceCommand),

    /// Browse entrepreneur expertise rows
    #[command(subcommand)]
    Expertise(ListCommand),

    /// Browse entrepreneur education rows
    #[command(subcommand)]
    Education(ListCommand),

    /// Browse entrepreneur work experience rows
    #[command(subcommand)]
    Experiences(ListCommand),

    /// Show a record together with its related rows
    #[command(subcommand)]
    Detail(DetailCommand),

    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml, json or toml)
        #[arg(long, short, default_value = "yaml")]
        format: ConfigFormat,

        /// Where to write the file; defaults to `venturematch.<format>` in the current directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)
        #[arg(long, short)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Config { format, output } => {
            return commands::config::generate_config(*format, output.as_deref());
        }
        Commands::Completion { shell } => {
            commands::completion::generate_completion(*shell);
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    init_tracing(&config.log_level);
    debug!(api = config.api_base(), session = %config.session_path.display(), "configuration loaded");

    let session = SessionStore::new(FileStorage::new(&config.session_path));
    let client = ApiClient::http(config.api_base(), session);

    match cli.command {
        Commands::Session(command) => commands::session::run(command, &client, &config).await,
        Commands::Projects(command) => commands::resource::run::<Project>(command, &client).await,
        Commands::Blogs(command) => commands::resource::run::<Blog>(command, &client).await,
        Commands::Entrepreneurs(command) => {
            commands::resource::run::<Entrepreneur>(command, &client).await
        }
        Commands::Investors(command) => commands::resource::run::<Investor>(command, &client).await,
        Commands::Interests(command) => {
            commands::resource::run::<InterestAndValue>(command, &client).await
        }
        Commands::Portfolios(command) => {
            commands::resource::run::<InvestmentPortfolio>(command, &client).await
        }
        Commands::Expertise(command) => {
            commands::resource::run_read_only::<Expertise>(command, &client).await
        }
        Commands::Education(command) => {
            commands::resource::run_read_only::<Education>(command, &client).await
        }
        Commands::Experiences(command) => {
            commands::resource::run_read_only::<Experience>(command, &client).await
        }
        Commands::Detail(command) => commands::detail::run(command, &client).await,
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

fn load_config(path: Option<&Path>, api_url: Option<&str>) -> Result<ClientConfig> {
    ClientConfig::load_config(path, api_url).context("failed to load configuration")
}

/// Logs to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
