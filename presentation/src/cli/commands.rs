//! CLI command definitions

use clap::{Parser, ValueEnum};
use noire_domain::Difficulty;
use std::path::PathBuf;

/// Difficulty as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    /// 3 suspects
    Easy,
    /// 5 suspects
    Medium,
    /// 7 suspects
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// CLI arguments for noire
#[derive(Parser, Debug)]
#[command(name = "noire")]
#[command(author, version, about = "Interrogate the suspects, then name the killer")]
#[command(long_about = r#"
Noire is a murder mystery played in the terminal.

Each game goes through three stages:
1. Intro: read the case file (setting, victim, weapon, suspects)
2. Investigation: question each suspect, up to 10 questions apiece
3. Accusation: name the killer. One guess decides the case.

Configuration files are loaded from (in priority order):
1. NOIRE_* environment variables (NOIRE_GAME__QUESTION_LIMIT=5)
2. --config <path>     Explicit config file
3. ./noire.toml        Project-level config
4. ~/.config/noire/config.toml   Global config

Example:
  noire
  noire --difficulty hard --new
  noire --offline --ephemeral
"#)]
pub struct Cli {
    /// Difficulty of a newly generated case
    #[arg(short, long, value_enum, value_name = "LEVEL")]
    pub difficulty: Option<DifficultyArg>,

    /// Use the built-in offline case generator instead of the API
    #[arg(long)]
    pub offline: bool,

    /// Start a new case even if a saved game exists
    #[arg(long)]
    pub new: bool,

    /// Keep the game in memory only (nothing is saved)
    #[arg(long)]
    pub ephemeral: bool,

    /// Write a JSONL transcript of the game to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
