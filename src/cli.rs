//! Command-line interface parsing for the Mars Rover Images CLI
//!
//! This module handles parsing of the `get` subcommand and the persistent
//! --config, --rover, and --camera flags using clap. Rover and camera are
//! parsed as optional so that an omitted flag falls through to environment
//! and config-file values before the built-in default applies.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mars Rover Images CLI - fetch and cache Mars rover photographs
#[derive(Parser, Debug)]
#[command(name = "rover-images")]
#[command(about = "Query Mars rover images from the NASA API")]
#[command(version)]
pub struct Cli {
    /// Config file (default is $HOME/config.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the rover to get images from [default: curiosity]
    #[arg(short, long, global = true, value_name = "NAME")]
    pub rover: Option<String>,

    /// Name of the camera to get images from [default: NAVCAM]
    #[arg(short = 'C', long, global = true, value_name = "NAME")]
    pub camera: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands understood by the CLI
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Obtains images from the configured Mars rover for the last 10 days
    Get,
}
