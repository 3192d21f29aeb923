pub mod data_table;
pub mod log_entry;
pub mod procedure;

pub use data_table::{DataRow, DataTable};
