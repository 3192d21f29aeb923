// src/export/mod.rs

mod csv;
mod fs_utils;
mod json;

pub use self::csv::write_csv;
pub use self::json::{table_to_json, value_to_json};

use crate::errors::{AppError, AppResult};
use crate::models::data_table::DataTable;
use crate::ui::messages::success;
use crate::utils::table::Table;
use clap::ValueEnum;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Table,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Table => "table",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Render `dt` in `format` into any writer.
pub fn write_table<W: Write>(out: &mut W, dt: &DataTable, format: ExportFormat) -> AppResult<()> {
    match format {
        ExportFormat::Table => {
            out.write_all(Table::from_data_table(dt).render().as_bytes())?;
            writeln!(out, "({} row(s))", dt.row_count())?;
        }
        ExportFormat::Csv => write_csv(&mut *out, dt)?,
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(&table_to_json(dt))
                .map_err(|e| AppError::Export(e.to_string()))?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

/// Write `dt` to stdout, or to `path` when given.
pub fn export_table(
    dt: &DataTable,
    format: ExportFormat,
    path: Option<&Path>,
    force: bool,
) -> AppResult<()> {
    match path {
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_table(&mut lock, dt, format)?;
            lock.flush()?;
        }
        Some(path) => {
            fs_utils::ensure_writable(path, force)?;
            let mut file = std::fs::File::create(path)?;
            write_table(&mut file, dt, format)?;
            file.flush()?;
            success(format!(
                "{} export completed: {}",
                format.as_str().to_uppercase(),
                path.display()
            ));
        }
    }
    Ok(())
}
