use crate::cli::commands::{ensure_connected, open_helper};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Catalog;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::parse_params;

pub fn handle(cmd: &Commands, cfg: &Config, catalog: Catalog) -> AppResult<()> {
    if let Commands::Exec { procedure, params } = cmd {
        let params = parse_params(params)?;
        let mut base = open_helper(cfg, catalog);

        if base.execute_non_query(procedure, params.as_ref())? {
            success(format!("{procedure} executed on {catalog}"));
        }
        ensure_connected(&base)?;
    }

    Ok(())
}
