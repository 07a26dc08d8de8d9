use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ScoreScale;
use crate::stats::WeekStart;

pub const DEFAULT_SHARED_STORE: &str = "golf-shared.sqlite";
pub const DEFAULT_ROUNDS_DB: &str = "golf-rounds.sqlite";

#[derive(Parser, Debug)]
#[command(about = "Score golf rounds hole by hole and track how your game is going")]
pub struct Cli {
    #[arg(long, global = true)]
    pub config_toml: Option<PathBuf>,
    /// SQLite file shared by the app and the widget.
    #[arg(long, global = true)]
    pub shared_store: Option<PathBuf>,
    /// SQLite file holding completed rounds.
    #[arg(long, global = true)]
    pub rounds_db: Option<PathBuf>,
    #[arg(long, global = true, value_enum)]
    pub week_start: Option<WeekStart>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start scoring a new round on hole 1.
    Start {
        course: Option<String>,
        #[arg(long)]
        nine: bool,
        /// Replace a round that is still in progress.
        #[arg(long)]
        force: bool,
    },
    /// Record a score for the hole in play.
    #[command(allow_negative_numbers = true)]
    Score { score: i32 },
    /// Show the round in progress.
    Status,
    /// Save a completed round to the history, or discard it.
    Finish {
        #[arg(long)]
        discard: bool,
    },
    /// Throw away the round in progress.
    Cancel,
    /// Act as the home-screen widget.
    Widget {
        #[command(subcommand)]
        action: WidgetCommand,
    },
    /// Enter a round by hand.
    Add(EntryArgs),
    /// Change a stored round.
    Edit {
        id: i64,
        #[command(flatten)]
        entry: EntryArgs,
    },
    Delete {
        id: i64,
    },
    /// List stored rounds, newest first.
    List,
    /// Dashboard and trend figures.
    Stats {
        #[arg(long)]
        html: bool,
        /// Print the trend chart series on this scale.
        #[arg(long, value_enum)]
        chart: Option<ScoreScale>,
        /// Print the running handicap series.
        #[arg(long)]
        handicap_chart: bool,
    },
    /// Show or change the weekly and monthly round goals.
    Goals {
        #[arg(long)]
        weekly: Option<u32>,
        #[arg(long)]
        monthly: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WidgetCommand {
    Show {
        #[arg(long)]
        html: bool,
    },
    #[command(allow_negative_numbers = true)]
    Score { score: i32 },
}

#[derive(Args, Debug, Default, Clone)]
pub struct EntryArgs {
    /// Day played, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub course: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, conflicts_with = "eighteen")]
    pub nine: bool,
    #[arg(long)]
    pub eighteen: bool,
    /// Hole scores in order, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub holes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub shared_store: Option<PathBuf>,
    pub rounds_db: Option<PathBuf>,
    pub week_start: Option<WeekStart>,
}

impl FileConfig {
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config toml {}", path.display()))?;
        toml::from_str::<FileConfig>(&contents)
            .with_context(|| format!("parse config toml {}", path.display()))
    }
}

/// Settings after the command line has been laid over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub shared_store: PathBuf,
    pub rounds_db: PathBuf,
    pub week_start: WeekStart,
}

/// Load config from CLI and optional TOML file. Flags win over the file.
///
/// # Errors
/// Returns an error if the config file is unreadable or invalid.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let file_config = match cli.config_toml.as_deref() {
        Some(path) => FileConfig::from_path(path)?,
        None => FileConfig::default(),
    };

    Ok(AppConfig {
        shared_store: cli
            .shared_store
            .clone()
            .or(file_config.shared_store)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SHARED_STORE)),
        rounds_db: cli
            .rounds_db
            .clone()
            .or(file_config.rounds_db)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROUNDS_DB)),
        week_start: cli.week_start.or(file_config.week_start).unwrap_or_default(),
    })
}
