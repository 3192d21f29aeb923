use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::Catalog;
use crate::db::procedures::provision_catalog;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the data source directory
///  - one database per mapped catalog, with its procedure store and log
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !cli.test {
        let path = Config::config_file();
        cfg.save_to(&path)?;
        info(format!("Config file : {}", path.display()));
    }

    let settings = cfg.connection_settings();
    info(format!("Data source : {}", settings.data_source.display()));

    for catalog in Catalog::ALL {
        let path = provision_catalog(&settings, catalog)?;
        success(format!("Catalog {catalog} ready at {}", path.display()));
    }

    success("sqlinteraction initialization completed!");
    Ok(())
}
