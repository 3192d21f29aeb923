//! Stored-procedure store of a catalog.
//!
//! SQLite has no native stored procedures, so each catalog keeps them in a
//! `stored_procedures` table: a name and a single SQL statement whose named
//! parameters form the procedure's signature.

use crate::db::catalog::Catalog;
use crate::db::command::derive_parameters;
use crate::db::connection_string::{ConnectionSettings, catalog_path};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::procedure::Procedure;
use chrono::Local;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Statement, params};
use std::fs;
use std::path::PathBuf;

/// Create the procedure store and the audit log if missing.
pub fn init_catalog(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS stored_procedures (
            name       TEXT PRIMARY KEY COLLATE NOCASE,
            body       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create (or upgrade) the database file behind `catalog`.
///
/// Returns the path of the provisioned file.
pub fn provision_catalog(settings: &ConnectionSettings, catalog: Catalog) -> AppResult<PathBuf> {
    let name = settings.catalogs.resolve(catalog)?;
    fs::create_dir_all(&settings.data_source)?;

    let path = catalog_path(&settings.data_source, name);
    let existed = path.exists();

    let conn = Connection::open_with_flags(
        &path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )?;
    init_catalog(&conn)?;

    if !existed {
        audit(&conn, "provision", name, &format!("Catalog created at {}", path.display()))?;
    }

    Ok(path)
}

/// Check if the procedure store exists in this catalog.
fn store_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='stored_procedures'",
    )?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Body of the procedure called `name`.
pub fn procedure_body(conn: &Connection, name: &str) -> AppResult<String> {
    if !store_exists(conn)? {
        return Err(AppError::UnknownProcedure(name.to_string()));
    }

    conn.query_row(
        "SELECT body FROM stored_procedures WHERE name = ?1",
        [name],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::UnknownProcedure(name.to_string()))
}

fn validate_name(name: &str) -> AppResult<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    if ok {
        Ok(())
    } else {
        Err(AppError::InvalidProcedure(format!(
            "'{name}' is not a valid procedure name (letters, digits, '_' and '.' only)"
        )))
    }
}

/// Store a procedure. The body must prepare cleanly as one statement.
pub fn define_procedure(conn: &Connection, name: &str, body: &str, replace: bool) -> AppResult<()> {
    validate_name(name)?;
    init_catalog(conn)?;

    let body = body.trim();
    conn.prepare(body)
        .map_err(|e| AppError::InvalidProcedure(format!("{name}: {e}")))?;

    let exists = conn
        .query_row(
            "SELECT 1 FROM stored_procedures WHERE name = ?1",
            [name],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if exists && !replace {
        return Err(AppError::InvalidProcedure(format!(
            "procedure '{name}' already exists (use --replace to overwrite it)"
        )));
    }

    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO stored_procedures (name, body, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET body = excluded.body, created_at = excluded.created_at",
        params![name, body, now],
    )?;

    let operation = if exists { "replace" } else { "define" };
    audit(conn, operation, name, body)?;
    Ok(())
}

/// Remove a procedure; unknown names are an error.
pub fn drop_procedure(conn: &Connection, name: &str) -> AppResult<()> {
    if !store_exists(conn)? {
        return Err(AppError::UnknownProcedure(name.to_string()));
    }

    let removed = conn.execute("DELETE FROM stored_procedures WHERE name = ?1", [name])?;
    if removed == 0 {
        return Err(AppError::UnknownProcedure(name.to_string()));
    }

    audit(conn, "drop", name, "Procedure removed")?;
    Ok(())
}

/// All procedures in the catalog, by name.
pub fn list_procedures(conn: &Connection) -> AppResult<Vec<Procedure>> {
    if !store_exists(conn)? {
        return Ok(Vec::new());
    }

    let mut stmt =
        conn.prepare("SELECT name, body, created_at FROM stored_procedures ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (name, body, created_at) = r?;
        // a body that no longer prepares (dropped table) still lists
        let parameters = conn
            .prepare(&body)
            .map(|stmt| parameter_names(&stmt))
            .unwrap_or_default();
        out.push(Procedure {
            name,
            body,
            parameters,
            created_at,
        });
    }
    Ok(out)
}

/// Declared parameters of `name`, in declaration order.
pub fn describe_parameters(conn: &Connection, name: &str) -> AppResult<Vec<String>> {
    let body = procedure_body(conn, name)?;
    let stmt = conn.prepare(&body)?;
    Ok(parameter_names(&stmt))
}

fn parameter_names(stmt: &Statement<'_>) -> Vec<String> {
    derive_parameters(stmt)
        .into_iter()
        .map(|(_, name)| name)
        .collect()
}
