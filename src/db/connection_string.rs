//! Connection settings and the connection string built from them.

use crate::db::catalog::CatalogMap;
use rusqlite::{Connection, OpenFlags};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PACKET_SIZE: u32 = 4096;
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 15;

/// File extension of a catalog database inside the data source directory.
pub const CATALOG_EXTENSION: &str = "sqlite";

/// Everything a helper needs to reach its catalog, minus the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub data_source: PathBuf,
    pub packet_size: u32,
    pub integrated_security: bool,
    pub persist_security_info: bool,
    pub connect_timeout: u64,
    pub catalogs: CatalogMap,
}

impl ConnectionSettings {
    pub fn new(data_source: impl Into<PathBuf>) -> Self {
        Self {
            data_source: data_source.into(),
            packet_size: DEFAULT_PACKET_SIZE,
            integrated_security: true,
            persist_security_info: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            catalogs: CatalogMap::default(),
        }
    }
}

/// Path of the database file backing `catalog_name`.
pub fn catalog_path(data_source: &Path, catalog_name: &str) -> PathBuf {
    data_source.join(format!("{catalog_name}.{CATALOG_EXTENSION}"))
}

/// A resolved connection string. Built per open, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub packet_size: u32,
    pub integrated_security: bool,
    pub data_source: PathBuf,
    pub persist_security_info: bool,
    pub initial_catalog: String,
    pub connect_timeout: u64,
}

impl ConnectionString {
    pub fn new(settings: &ConnectionSettings, catalog_name: &str) -> Self {
        Self {
            packet_size: settings.packet_size,
            integrated_security: settings.integrated_security,
            data_source: settings.data_source.clone(),
            persist_security_info: settings.persist_security_info,
            initial_catalog: catalog_name.to_string(),
            connect_timeout: settings.connect_timeout,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        catalog_path(&self.data_source, &self.initial_catalog)
    }

    /// Open the handle this string describes.
    ///
    /// The catalog must already exist: a missing file is a connection
    /// failure, not an invitation to create an empty database.
    pub fn connect(&self) -> rusqlite::Result<Connection> {
        // a `file:` prefix is part of the path, never a URI
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(self.database_path(), flags)?;
        conn.busy_timeout(Duration::from_secs(self.connect_timeout))?;
        Ok(conn)
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "packet size={};", self.packet_size)?;
        if self.integrated_security {
            f.write_str("integrated security=SSPI;")?;
        }
        write!(
            f,
            "data source='{}';persist security info={};initial catalog={};connect timeout={}",
            self.data_source.display(),
            if self.persist_security_info { "True" } else { "False" },
            self.initial_catalog,
            self.connect_timeout
        )
    }
}
