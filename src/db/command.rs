//! Stored-procedure invocations.
//!
//! An invocation is always a named procedure looked up in the catalog's
//! procedure store; ad-hoc SQL text is never executed through here.

use crate::db::procedures::procedure_body;
use crate::errors::{AppError, AppResult};
use crate::models::data_table::DataTable;
use rusqlite::types::Value;
use rusqlite::{Connection, Statement};
use std::collections::BTreeMap;
use tracing::debug;

/// Parameter name → value, supplied per call.
pub type Params = BTreeMap<String, Value>;

/// Parameter name without its `@`, `:` or `$` sigil.
fn bare(name: &str) -> &str {
    name.trim_start_matches(['@', ':', '$'])
}

/// Named parameters declared by a prepared statement, with their bind
/// index, in declaration order. Anonymous `?` placeholders have no name and
/// are not part of the signature.
pub fn derive_parameters(stmt: &Statement<'_>) -> Vec<(usize, String)> {
    (1..=stmt.parameter_count())
        .filter_map(|i| stmt.parameter_name(i).map(|n| (i, n.to_string())))
        .collect()
}

pub struct StoredProcedureCommand<'conn> {
    stmt: Statement<'conn>,
}

/// Prepare procedure `name` and bind `params` to its declared parameters.
///
/// The signature is only derived when parameters are supplied. Declared
/// parameters left out of `params` stay NULL.
pub fn build_stored_procedure_command<'conn>(
    conn: &'conn Connection,
    name: &str,
    params: Option<&Params>,
) -> AppResult<StoredProcedureCommand<'conn>> {
    let body = procedure_body(conn, name)?;
    let mut stmt = conn.prepare(&body)?;

    if let Some(params) = params {
        let declared = derive_parameters(&stmt);

        for (key, value) in params {
            let index = declared
                .iter()
                .find(|(_, declared)| bare(declared).eq_ignore_ascii_case(bare(key)))
                .map(|(i, _)| *i)
                .ok_or_else(|| AppError::UnknownParameter {
                    procedure: name.to_string(),
                    parameter: key.clone(),
                })?;

            stmt.raw_bind_parameter(index, value)?;
        }

        debug!(procedure = name, bound = params.len(), declared = declared.len(), "parameters bound");
    }

    Ok(StoredProcedureCommand { stmt })
}

impl StoredProcedureCommand<'_> {
    /// First column of the first row, if any row came back.
    pub fn execute_scalar(&mut self) -> AppResult<Option<Value>> {
        let mut rows = self.stmt.raw_query();
        match rows.next()? {
            Some(row) => Ok(Some(row.get::<_, Value>(0)?)),
            None => Ok(None),
        }
    }

    /// Run to completion, discarding any rows produced.
    pub fn execute_non_query(&mut self) -> AppResult<()> {
        let mut rows = self.stmt.raw_query();
        while rows.next()?.is_some() {}
        Ok(())
    }

    /// Materialize the whole result set.
    pub fn fill(&mut self) -> AppResult<DataTable> {
        let columns: Vec<String> = self
            .stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = columns.len();
        let mut table = DataTable::new(columns);

        let mut rows = self.stmt.raw_query();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(row.get::<_, Value>(i)?);
            }
            table.push_row(values)?;
        }

        Ok(table)
    }
}
