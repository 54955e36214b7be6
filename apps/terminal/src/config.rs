//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use flipcards_core::{Catalog, StudyApp, Theme};

/// Name of the subject created when starting without the samples.
const EMPTY_SUBJECT_NAME: &str = "My Subject";

#[derive(Debug, Parser)]
#[command(name = "flipcards", about = "Flashcard study in the terminal", version)]
pub struct Cli {
    /// Delay before moving to the next card after scoring, in milliseconds
    #[arg(long, env = "FLIPCARDS_ADVANCE_DELAY_MS", default_value_t = 300)]
    pub advance_delay_ms: u64,

    /// Start with one empty subject instead of the sample subjects
    #[arg(long, env = "FLIPCARDS_EMPTY")]
    pub empty: bool,

    /// Start in dark mode
    #[arg(long, env = "FLIPCARDS_DARK")]
    pub dark: bool,

    /// Append logs to this file (no logging without it)
    #[arg(long, env = "FLIPCARDS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub advance_delay: Duration,
    pub start_empty: bool,
    pub theme: Theme,
    pub log_file: Option<PathBuf>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            advance_delay: Duration::from_millis(cli.advance_delay_ms),
            start_empty: cli.empty,
            theme: if cli.dark { Theme::Dark } else { Theme::Light },
            log_file: cli.log_file,
        }
    }
}

impl Config {
    /// Load `.env`, then parse the process arguments.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Cli::parse().into()
    }

    /// Application state for a fresh start.
    pub fn build_app(&self) -> flipcards_core::Result<StudyApp> {
        let catalog = if self.start_empty {
            Catalog::with_subject(EMPTY_SUBJECT_NAME)?
        } else {
            Catalog::sample()
        };
        Ok(StudyApp::new(catalog).with_theme(self.theme))
    }
}
