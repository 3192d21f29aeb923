use crate::cli::commands::{ensure_connected, open_helper};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Catalog;
use crate::errors::AppResult;
use crate::utils::{parse_params, value_to_string};

pub fn handle(cmd: &Commands, cfg: &Config, catalog: Catalog) -> AppResult<()> {
    if let Commands::Scalar { procedure, params } = cmd {
        let params = parse_params(params)?;
        let mut base = open_helper(cfg, catalog);

        let value = base.execute_scalar(procedure, params.as_ref())?;
        ensure_connected(&base)?;

        match value {
            Some(v) => println!("{}", value_to_string(&v)),
            None => println!("(no result)"),
        }
    }

    Ok(())
}
