use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tense_master::{DailyMode, GauntletMode};

mod cli;

#[derive(Parser)]
#[command(name = "tense-master")]
#[command(about = "Tense Master - level up your English tenses")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.tense-master/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Username to play as
    #[arg(short, long, global = true, env = "TENSE_MASTER_USER")]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config file and database
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Import a TOML content pack (courses, questions, gauntlet challenges)
    Import { file: PathBuf },

    /// Create a new profile
    Register { username: String, email: String },

    /// Show level, coins, streak and course progress
    Profile,

    /// List achievements, unlocked first
    Achievements,

    /// List courses and their tenses
    Courses,

    /// Take a lesson quiz on one tense
    Lesson { course: String, tense: String },

    /// Take today's challenge
    Daily {
        /// classic, hard or time-attack (defaults to the mode of the day)
        mode: Option<DailyMode>,
    },

    /// Take a review quiz across a whole course
    Review { course: String },

    /// Play a Grammar Gauntlet game: detective, cloze or identification
    Gauntlet { mode: GauntletMode },

    /// Browse and buy themes and power-ups
    Shop {
        #[command(subcommand)]
        command: Option<ShopCommands>,
    },

    /// Show the top players by XP
    Leaderboard {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ShopCommands {
    /// List all items
    List,
    /// Buy an item by id
    Buy { item: String },
    /// Switch to an owned theme
    Theme { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init { force } = cli.command {
        return cli::init::init_command(cli.config.as_deref(), force).await;
    }

    let ctx = cli::Context::open(cli.config.as_deref())?;
    let user = cli.user.as_deref();

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Import { file } => cli::import::import_command(&ctx, &file).await?,
        Commands::Register { username, email } => {
            cli::profile::register_command(&ctx, &username, &email).await?
        }
        Commands::Profile => cli::profile::profile_command(&ctx, user).await?,
        Commands::Achievements => cli::profile::achievements_command(&ctx, user).await?,
        Commands::Courses => cli::profile::courses_command(&ctx, user).await?,
        Commands::Lesson { course, tense } => {
            cli::quiz::lesson_command(&ctx, user, &course, &tense).await?
        }
        Commands::Daily { mode } => cli::quiz::daily_command(&ctx, user, mode).await?,
        Commands::Review { course } => cli::quiz::review_command(&ctx, user, &course).await?,
        Commands::Gauntlet { mode } => cli::gauntlet::gauntlet_command(&ctx, user, mode).await?,
        Commands::Shop { command } => match command.unwrap_or(ShopCommands::List) {
            ShopCommands::List => cli::shop::list_command(&ctx, user).await?,
            ShopCommands::Buy { item } => cli::shop::buy_command(&ctx, user, &item).await?,
            ShopCommands::Theme { id } => cli::shop::theme_command(&ctx, user, &id).await?,
        },
        Commands::Leaderboard { limit } => cli::profile::leaderboard_command(&ctx, limit).await?,
    }

    Ok(())
}
