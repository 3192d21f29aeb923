use crate::errors::{AppError, AppResult};
use crate::models::data_table::DataTable;
use crate::utils::formatting::value_to_string;
use csv::Writer;
use rusqlite::types::Value;
use std::io::Write;

/// Header row of column names, then one record per row. NULL is an empty field.
pub fn write_csv<W: Write>(out: W, dt: &DataTable) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(dt.columns())
        .map_err(|e| AppError::Export(e.to_string()))?;

    for row in dt.rows() {
        let record: Vec<String> = row
            .values()
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => value_to_string(other),
            })
            .collect();
        wtr.write_record(&record)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
