use crate::db::catalog::{Catalog, CatalogMap};
use crate::db::connection_string::{
    ConnectionSettings, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PACKET_SIZE,
};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub data_source: String,
    #[serde(default = "default_packet_size")]
    pub packet_size: u32,
    #[serde(default = "default_true")]
    pub integrated_security: bool,
    #[serde(default)]
    pub persist_security_info: bool,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_catalog")]
    pub default_catalog: Catalog,
    #[serde(default)]
    pub catalogs: CatalogMap,
}

fn default_packet_size() -> u32 {
    DEFAULT_PACKET_SIZE
}
fn default_true() -> bool {
    true
}
fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT
}
fn default_catalog() -> Catalog {
    Catalog::Test1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: Self::data_dir().to_string_lossy().to_string(),
            packet_size: default_packet_size(),
            integrated_security: true,
            persist_security_info: false,
            connect_timeout: default_connect_timeout(),
            default_catalog: default_catalog(),
            catalogs: CatalogMap::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("sqlinteraction")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".sqlinteraction")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sqlinteraction.conf")
    }

    /// Default directory holding the catalog databases
    pub fn data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    /// Load the configuration file, or defaults if there is none
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        cfg.catalogs.validate()?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    pub fn data_source_path(&self) -> PathBuf {
        expand_tilde(&self.data_source)
    }

    /// Settings a helper is built from.
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            data_source: self.data_source_path(),
            packet_size: self.packet_size,
            integrated_security: self.integrated_security,
            persist_security_info: self.persist_security_info,
            connect_timeout: self.connect_timeout,
            catalogs: self.catalogs.clone(),
        }
    }
}
