pub mod clean;

use clap::{Parser, Subcommand};
use remnant_lib::config::Mode;
use remnant_lib::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "remnant")]
#[command(
    about = "Find and remove orphaned media artwork, subtitles and metadata",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Clean orphaned episode artwork and subtitles")]
    Tv {
        #[command(flatten)]
        opts: clean::CleanOpts,
    },

    #[command(about = "Clean movie folders left undersized after the video was removed")]
    Movies {
        #[command(flatten)]
        opts: clean::CleanOpts,
    },

    #[command(about = "Clean album folders whose audio files are gone")]
    Music {
        #[command(flatten)]
        opts: clean::CleanOpts,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let (mode, opts) = match cli.command {
        Commands::Tv { opts } => (Mode::Tv, opts),
        Commands::Movies { opts } => (Mode::Movies, opts),
        Commands::Music { opts } => (Mode::Music, opts),
    };

    clean::handle_clean_command(mode, &opts, cli.config.as_deref(), cli.verbose, cli.quiet)
}
