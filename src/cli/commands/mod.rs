pub mod config;
pub mod exec;
pub mod fetch;
pub mod init;
pub mod log;
pub mod ping;
pub mod proc;
pub mod scalar;

use crate::config::Config;
use crate::db::{Catalog, SqlBase};
use crate::errors::{AppError, AppResult};

/// Helper bound to `catalog` with the configured connection settings.
pub(crate) fn open_helper(cfg: &Config, catalog: Catalog) -> SqlBase {
    SqlBase::new(catalog, cfg.connection_settings())
}

/// Turn a failed open into a CLI error so the process exits non-zero.
pub(crate) fn ensure_connected(base: &SqlBase) -> AppResult<()> {
    match base.last_open_succeeded() {
        Some(false) => Err(AppError::NotConnected(
            base.catalog_name().unwrap_or(base.catalog().key()).to_string(),
        )),
        _ => Ok(()),
    }
}
