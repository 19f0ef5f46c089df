use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::games::hangman::{GameEngine, WordBank};

#[derive(Parser, Debug)]
#[command(name = "hangterm")]
#[command(about = "🎩 El ahorcado, en la terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON word list to play with instead of the built-in Spanish one
    #[arg(short, long, global = true)]
    pub words: Option<PathBuf>,

    /// Category to start in (defaults to the first one)
    #[arg(short, long, global = true)]
    pub category: Option<String>,

    /// Seed for reproducible word picks
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Write logs to this file; the game screen owns the terminal
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: Level,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Play a game (the default)
    Play,
    /// List categories and how many words each has
    List,
}

/// Everything needed to build an engine, resolved and validated from the CLI.
#[derive(Debug)]
pub struct Settings {
    pub bank: WordBank,
    pub category: Option<String>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let bank = load_word_bank(cli.words.as_deref())?;
        if let Some(name) = &cli.category {
            bank.position(name)?;
        }

        Ok(Self {
            bank,
            category: cli.category.clone(),
            seed: cli.seed,
        })
    }

    pub fn into_engine(self) -> Result<GameEngine> {
        let mut engine = match self.seed {
            Some(seed) => GameEngine::with_seed(self.bank, seed),
            None => GameEngine::from_entropy(self.bank),
        };
        if let Some(name) = &self.category {
            engine.select_category(name)?;
        }
        Ok(engine)
    }
}

/// The word list at `path`, or the built-in one.
pub fn load_word_bank(path: Option<&Path>) -> Result<WordBank> {
    let Some(path) = path else {
        return Ok(WordBank::default());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    WordBank::from_json(&json).with_context(|| format!("invalid word list {}", path.display()))
}

/// Send `tracing` output to `path`. Without a path nothing is installed and
/// events are dropped.
pub fn init_logging(path: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}
