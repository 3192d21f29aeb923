//! sqlinteraction library root.
//! Exposes the connection helper (`db::SqlBase`), the CLI parser and the
//! high-level run() function used by main.rs.

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use db::Catalog;
use errors::AppResult;
use std::str::FromStr;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, catalog: Catalog) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Ping => cli::commands::ping::handle(cfg, catalog),
        Commands::Scalar { .. } => cli::commands::scalar::handle(&cli.command, cfg, catalog),
        Commands::Exec { .. } => cli::commands::exec::handle(&cli.command, cfg, catalog),
        Commands::Fetch { .. } => cli::commands::fetch::handle(&cli.command, cfg, catalog),
        Commands::Proc { .. } => cli::commands::proc::handle(&cli.command, cfg, catalog),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg, catalog),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load the config once
    let mut cfg = Config::load()?;

    if let Some(data_source) = &cli.data_source {
        cfg.data_source = data_source.clone();
    }

    // an unknown --catalog is a configuration error, raised before any open
    let catalog = match &cli.catalog {
        Some(name) => Catalog::from_str(name)?,
        None => cfg.default_catalog,
    };

    dispatch(&cli, &cfg, catalog)
}
