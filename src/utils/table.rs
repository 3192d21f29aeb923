//! Table rendering utilities for CLI outputs.

use crate::models::data_table::DataTable;
use crate::utils::formatting::value_to_string;
use unicode_width::UnicodeWidthStr;

/// Widest cell that is printed in full; longer cells are cut with `…`.
const MAX_CELL_WIDTH: usize = 40;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }

    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 1 >= width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Size every column to its widest cell.
    pub fn from_data_table(dt: &DataTable) -> Self {
        let mut columns: Vec<Column> = dt
            .columns()
            .iter()
            .map(|c| Column {
                header: c.clone(),
                width: c.width().min(MAX_CELL_WIDTH),
            })
            .collect();

        let mut table_rows = Vec::with_capacity(dt.row_count());
        for row in dt.rows() {
            let cells: Vec<String> = row
                .values()
                .iter()
                .map(|v| truncate(&value_to_string(v), MAX_CELL_WIDTH))
                .collect();
            for (col, cell) in columns.iter_mut().zip(&cells) {
                col.width = col.width.max(cell.width());
            }
            table_rows.push(cells);
        }

        let mut table = Table::new(columns);
        table.rows = table_rows;
        table
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&truncate(&col.header, col.width), col.width));
            out.push(' ');
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
