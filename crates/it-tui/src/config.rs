//! Command-line configuration

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Tabletop initiative tracker
#[derive(Parser, Debug)]
#[command(name = "initrack")]
#[command(author, version, about = "Initiative tracker for tabletop combat", long_about = None)]
pub struct Args {
    /// Directory holding the saved roster (dnd_players.json)
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Directory combat-log.json is exported to
    #[arg(long = "export-dir")]
    pub export_dir: Option<PathBuf>,

    /// Keep the roster in memory only
    #[arg(long = "ephemeral")]
    pub ephemeral: bool,

    /// Use the light color theme
    #[arg(long = "light")]
    pub light: bool,

    /// Diagnostics log file (defaults to initrack.log in the data directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub ephemeral: bool,
    pub light: bool,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(it_save::default_data_dir);
        let log_file = args
            .log_file
            .unwrap_or_else(|| data_dir.join("initrack.log"));
        let log_level = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };

        Self {
            export_dir: args.export_dir.unwrap_or_else(|| PathBuf::from(".")),
            data_dir,
            ephemeral: args.ephemeral,
            light: args.light,
            log_file,
            log_level,
        }
    }
}
