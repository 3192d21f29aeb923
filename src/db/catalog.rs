//! Known catalogs and their mapping to database names.
//!
//! The set of catalogs is closed: adding a database means adding a variant
//! here and (optionally) a mapping entry in the configuration file.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Catalog {
    #[serde(rename = "TEST1")]
    Test1,
    #[serde(rename = "TEST2")]
    Test2,
}

impl Catalog {
    pub const ALL: [Catalog; 2] = [Catalog::Test1, Catalog::Test2];

    /// Symbolic key, also the default database name.
    pub fn key(&self) -> &'static str {
        match self {
            Catalog::Test1 => "TEST1",
            Catalog::Test2 => "TEST2",
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Catalog {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Catalog::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Config(format!("Unknown catalog '{s}'")))
    }
}

/// Catalog → database name registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogMap(BTreeMap<Catalog, String>);

impl Default for CatalogMap {
    fn default() -> Self {
        Self(
            Catalog::ALL
                .into_iter()
                .map(|c| (c, c.key().to_string()))
                .collect(),
        )
    }
}

impl CatalogMap {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, catalog: Catalog, name: impl Into<String>) {
        self.0.insert(catalog, name.into());
    }

    pub fn remove(&mut self, catalog: Catalog) {
        self.0.remove(&catalog);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Catalog, &str)> {
        self.0.iter().map(|(c, n)| (*c, n.as_str()))
    }

    /// Look up the database name for `catalog`.
    ///
    /// Fails with a configuration error when the catalog is unmapped, mapped
    /// to a blank name, or mapped to something that is not a bare name.
    pub fn resolve(&self, catalog: Catalog) -> AppResult<&str> {
        let name = self
            .0
            .get(&catalog)
            .map(|n| n.trim())
            .ok_or_else(|| AppError::Config(format!("No database name mapped for catalog {catalog}")))?;

        if name.is_empty() {
            return Err(AppError::Config(format!(
                "Catalog {catalog} is mapped to an empty database name"
            )));
        }

        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(AppError::Config(format!(
                "Catalog {catalog} is mapped to '{name}', which is not a plain database name"
            )));
        }

        Ok(name)
    }

    /// Every variant resolves, and no two variants share a database name.
    pub fn validate(&self) -> AppResult<()> {
        let mut seen: BTreeMap<String, Catalog> = BTreeMap::new();

        for catalog in Catalog::ALL {
            let name = self.resolve(catalog)?.to_ascii_uppercase();
            if let Some(other) = seen.insert(name.clone(), catalog) {
                return Err(AppError::Config(format!(
                    "Catalogs {other} and {catalog} are both mapped to '{name}'"
                )));
            }
        }

        Ok(())
    }
}
