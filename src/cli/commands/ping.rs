use crate::cli::commands::open_helper;
use crate::config::Config;
use crate::db::Catalog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cfg: &Config, catalog: Catalog) -> AppResult<()> {
    let mut base = open_helper(cfg, catalog);
    let conn_str = base.connection_string()?;

    if base.test_db_connection()? {
        success(format!(
            "Connection to {} succeeded ({})",
            conn_str.initial_catalog,
            conn_str.database_path().display()
        ));
        Ok(())
    } else {
        Err(AppError::NotConnected(conn_str.initial_catalog))
    }
}
