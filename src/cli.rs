use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "typeahead")]
#[command(about = "typeahead - Prefix autocomplete server with popularity-ranked completions.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Path to the dictionary word list (overrides the config value).
    #[arg(long)]
    pub dict: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },
}
