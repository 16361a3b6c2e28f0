use clap::{ArgAction, Parser, Subcommand};
use commands::{catalog, config, play, search, AppContext};
use reelhub_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelhub")]
#[command(about = "ReelHub - one movie catalog over spreadsheets, video hosts and channel feeds")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to the daily-rotated log file instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every source and show the merged catalog
    #[command(long_about = "Fetch all configured sources concurrently, merge them newest first and show the hero, new and recommended sections. A failing source only shrinks the catalog.")]
    Catalog {
        /// List every record instead of the three sections
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,
    },
    /// Search the catalog and the metadata source by title
    Search {
        /// Title to search for; a blank query means no search is active
        #[arg(num_args = 0.., trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Resolve a catalog record to a playable URL
    #[command(long_about = "Resolve the playable URL for a catalog record, then show its display metadata with a best-effort overlay from the metadata source.")]
    Play {
        /// Record id as shown by `reelhub catalog` (e.g. sheet-12, dood-abc123)
        id: String,

        /// Skip the metadata lookup
        #[arg(long, action = ArgAction::SetTrue)]
        no_enrich: bool,
    },
    /// Manage configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show current configuration (masks credentials)
    Show {
        /// Show credentials unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store a credential (video_host_api_key, metadata_api_key, channel_bot_token)
    Credential {
        name: String,

        /// Value to store; prompted for when omitted
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli.log_to_file.then(|| PathManager::default().log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Catalog { all } => {
            let ctx = AppContext::load(cli.config.as_deref())?;
            catalog::run_catalog(&ctx, all, &output).await
        }
        Commands::Search { query } => {
            let ctx = AppContext::load(cli.config.as_deref())?;
            search::run_search(&ctx, &query.join(" "), &output).await
        }
        Commands::Play { id, no_enrich } => {
            let ctx = AppContext::load(cli.config.as_deref())?;
            play::run_play(&ctx, &id, no_enrich, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, cli.config.as_deref(), &output),
    }
}
