use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "people-directory")]
#[command(about = "Browse and edit a locally cached people directory")]
pub struct Cli {
    /// Remote endpoint returning the list of people
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory holding the local cache
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print every entry
    List,
    /// Add a person by name
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Remove a person by id
    Remove { id: String },
    /// Show where the directory data comes from
    Source,
}

impl Cli {
    /// Environment first, flags on top.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }
}
