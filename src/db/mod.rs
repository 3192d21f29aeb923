pub mod catalog;
pub mod command;
pub mod connection_string;
pub mod helper;
pub mod log;
pub mod procedures;

pub use catalog::{Catalog, CatalogMap};
pub use command::Params;
pub use connection_string::{ConnectionSettings, ConnectionString};
pub use helper::{ConnectionState, SqlBase};
pub use rusqlite::types::Value;
