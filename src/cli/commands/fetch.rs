use crate::cli::commands::{ensure_connected, open_helper};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Catalog;
use crate::errors::AppResult;
use crate::export::export_table;
use crate::utils::parse_params;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config, catalog: Catalog) -> AppResult<()> {
    if let Commands::Fetch {
        procedure,
        params,
        format,
        out,
        force,
    } = cmd
    {
        let params = parse_params(params)?;
        let mut base = open_helper(cfg, catalog);

        let table = base.fill_data_table(procedure, params.as_ref())?;
        ensure_connected(&base)?;

        let out = out.as_deref().map(expand_tilde);
        export_table(&table, *format, out.as_deref(), *force)?;
    }

    Ok(())
}
