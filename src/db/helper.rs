//! Connection helper for stored-procedure data access.
//!
//! `SqlBase` owns one lazily opened handle bound to a catalog. Data-access
//! types embed it and call its three condensed operations: every call opens
//! the handle, runs one procedure and closes the handle again, whatever the
//! outcome.
//!
//! ```no_run
//! use sqlinteraction::db::{Catalog, ConnectionSettings, SqlBase};
//! use sqlinteraction::errors::AppResult;
//!
//! struct Users {
//!     base: SqlBase,
//! }
//!
//! impl Users {
//!     fn count(&mut self) -> AppResult<Option<i64>> {
//!         let value = self.base.execute_scalar("GetUserCount", None)?;
//!         Ok(value.and_then(|v| match v {
//!             rusqlite::types::Value::Integer(n) => Some(n),
//!             _ => None,
//!         }))
//!     }
//! }
//!
//! let mut users = Users {
//!     base: SqlBase::new(Catalog::Test1, ConnectionSettings::new("/srv/data")),
//! };
//! println!("{:?}", users.count());
//! ```

use crate::db::catalog::Catalog;
use crate::db::command::{Params, build_stored_procedure_command};
use crate::db::connection_string::{ConnectionSettings, ConnectionString};
use crate::errors::{AppError, AppResult};
use crate::models::data_table::DataTable;
use crate::ui::{ConsoleReporter, ErrorReporter};
use rusqlite::Connection;
use rusqlite::types::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Closed,
    Open,
}

pub struct SqlBase {
    catalog: Catalog,
    settings: ConnectionSettings,
    conn: Option<Connection>,
    catalog_name: Option<String>,
    last_open: Option<bool>,
    reporter: Box<dyn ErrorReporter>,
    released: bool,
}

/// Closes the helper's handle when dropped, on every exit path.
struct OpenScope<'a> {
    base: &'a mut SqlBase,
}

impl OpenScope<'_> {
    fn connection(&self) -> AppResult<&Connection> {
        self.base.conn.as_ref().ok_or_else(|| {
            AppError::NotConnected(self.base.catalog_name.clone().unwrap_or_default())
        })
    }
}

impl Drop for OpenScope<'_> {
    fn drop(&mut self) {
        self.base.close_db();
    }
}

impl SqlBase {
    /// Bind a helper to `catalog`. Nothing is opened yet.
    pub fn new(catalog: Catalog, settings: ConnectionSettings) -> Self {
        Self {
            catalog,
            settings,
            conn: None,
            catalog_name: None,
            last_open: None,
            reporter: Box::new(ConsoleReporter),
            released: false,
        }
    }

    /// Replace the sink receiving connection-failure messages.
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Database name resolved by the last open attempt.
    pub fn catalog_name(&self) -> Option<&str> {
        self.catalog_name.as_deref()
    }

    /// Outcome of the last open attempt; `None` before the first one.
    pub fn last_open_succeeded(&self) -> Option<bool> {
        self.last_open
    }

    pub fn state(&self) -> ConnectionState {
        if self.conn.is_some() {
            ConnectionState::Open
        } else {
            ConnectionState::Closed
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Connection string the next open would use.
    pub fn connection_string(&self) -> AppResult<ConnectionString> {
        let name = self.settings.catalogs.resolve(self.catalog)?;
        Ok(ConnectionString::new(&self.settings, name))
    }

    fn report(&self, message: String) {
        warn!(catalog = %self.catalog, "{message}");
        self.reporter.report(&message);
    }

    /// Open the handle.
    ///
    /// `Ok(false)` when the database could not be reached; the reason has
    /// already gone to the reporter. An unmapped catalog is a hard error.
    pub fn open_db(&mut self) -> AppResult<bool> {
        if self.released {
            return Err(AppError::Released);
        }

        // settings may have changed since the handle was opened
        if self.state() == ConnectionState::Open {
            self.close_db();
        }

        self.last_open = None;
        let conn_str = self.connection_string()?;
        let catalog_name = conn_str.initial_catalog.clone();
        self.catalog_name = Some(catalog_name.clone());
        debug!(catalog = %catalog_name, connection = %conn_str, "opening connection");

        match conn_str.connect() {
            Ok(conn) => self.conn = Some(conn),
            Err(e) => {
                self.report(format!(
                    "There was an error connecting to the {catalog_name} database, error: {e}"
                ));
                self.last_open = Some(false);
                return Ok(false);
            }
        }

        if !self.handle_is_usable() {
            self.close_db();
            self.report(format!(
                "There was an error connecting to the {catalog_name} database."
            ));
            self.last_open = Some(false);
            return Ok(false);
        }

        self.last_open = Some(true);
        Ok(true)
    }

    /// SQLite opens lazily: a file that is not a database only fails on the
    /// first read, so read the schema version before calling the handle open.
    fn handle_is_usable(&self) -> bool {
        self.conn.as_ref().is_some_and(|conn| {
            conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
                .is_ok()
        })
    }

    /// Close the handle if open. Always succeeds.
    pub fn close_db(&mut self) -> bool {
        if let Some(conn) = self.conn.take() {
            if let Err((conn, e)) = conn.close() {
                warn!(catalog = %self.catalog, error = %e, "close failed, dropping handle");
                drop(conn);
            }
            debug!(catalog = %self.catalog, "connection closed");
        }
        true
    }

    /// Whether the catalog can be opened right now. Leaves the handle closed.
    pub fn test_db_connection(&mut self) -> AppResult<bool> {
        let opened = self.open_db();
        self.close_db();
        opened
    }

    /// Run `f` against an open handle, closing it afterwards.
    ///
    /// `Ok(None)` when the handle could not be opened.
    pub fn with_connection<T>(
        &mut self,
        f: impl FnOnce(&Connection) -> AppResult<T>,
    ) -> AppResult<Option<T>> {
        let mut scope = OpenScope { base: self };
        if !scope.base.open_db()? {
            return Ok(None);
        }

        let conn = scope.connection()?;
        f(conn).map(Some)
    }

    /// Single value returned by procedure `name`.
    ///
    /// `None` when the procedure produced no row or the connection did not
    /// open; `Some(Value::Null)` when the value itself is NULL.
    pub fn execute_scalar(&mut self, name: &str, params: Option<&Params>) -> AppResult<Option<Value>> {
        debug!(procedure = name, "execute scalar");
        let value = self.with_connection(|conn| {
            build_stored_procedure_command(conn, name, params)?.execute_scalar()
        })?;
        Ok(value.flatten())
    }

    /// Run procedure `name` for its side effects. `false` when the connection
    /// did not open.
    pub fn execute_non_query(&mut self, name: &str, params: Option<&Params>) -> AppResult<bool> {
        debug!(procedure = name, "execute non-query");
        let done = self.with_connection(|conn| {
            build_stored_procedure_command(conn, name, params)?.execute_non_query()
        })?;
        Ok(done.is_some())
    }

    /// All rows produced by procedure `name`. Empty when the connection did
    /// not open.
    pub fn fill_data_table(&mut self, name: &str, params: Option<&Params>) -> AppResult<DataTable> {
        debug!(procedure = name, "fill data table");
        let table = self.with_connection(|conn| {
            build_stored_procedure_command(conn, name, params)?.fill()
        })?;
        Ok(table.unwrap_or_default())
    }

    /// Close and release the handle. Further opens fail with
    /// [`AppError::Released`]. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.released {
            return;
        }
        self.close_db();
        self.released = true;
        debug!(catalog = %self.catalog, "connection helper released");
    }
}

impl Drop for SqlBase {
    fn drop(&mut self) {
        self.dispose();
    }
}
