//! pushstate command-line front end
//!
//! Thin wrappers over the core crates:
//! - `normalize`: normalize a URL against the configured document root
//! - `replay`: run a scripted push/back/forward session on an in-memory host
//! - `docs`: extract documented methods from a comment AST

pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pushstate_core::Config;

use commands::docs::DocsArgs;
use commands::normalize::NormalizeArgs;
use commands::replay::ReplayArgs;

#[derive(Debug, Parser)]
#[command(name = "pushstate", version, about = "Session history normalization and replay")]
pub struct Cli {
    /// Configuration file (defaults to ./pushstate.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize a URL the way a push would
    Normalize(NormalizeArgs),
    /// Replay a scripted navigation session
    Replay(ReplayArgs),
    /// Extract documented methods from a comment AST
    Docs(DocsArgs),
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading configuration from {}", path.display())),
            None => {
                let cwd = std::env::current_dir().context("resolving working directory")?;
                Config::discover(cwd).context("loading configuration")
            }
        }
    }
}

pub fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Normalize(args) => commands::normalize::run(config, args),
        Commands::Replay(args) => commands::replay::run(config, args),
        Commands::Docs(args) => commands::docs::run(args),
    }
}
