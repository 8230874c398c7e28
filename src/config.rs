// ⚙️ Configuration - figment layers: defaults → TOML file → MEDREG_ env vars
//
// Example medreg.toml:
//
//   [catalog]
//   data_dir = "content"      # optional JSON overrides
//
//   [pagination]
//   page_size = 10
//   initial_page_size = 10
//
//   [server]
//   bind = "0.0.0.0:3000"
//
// Environment: MEDREG_SERVER_BIND=127.0.0.1:8080, MEDREG_PAGINATION_PAGE_SIZE=20

use crate::entities::Catalogs;
use crate::error::{CatalogError, CatalogResult};
use crate::pagination::{PageCursor, DEFAULT_INITIAL_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "medreg.toml";
pub const ENV_PREFIX: &str = "MEDREG_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub pagination: PaginationConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding regulations.json / tools.json / timeline.json.
    /// None uses the built-in catalogs.
    pub data_dir: Option<PathBuf>,

    /// Refuse to start when validation finds critical issues
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub initial_page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            page_size: DEFAULT_PAGE_SIZE,
            initial_page_size: DEFAULT_INITIAL_PAGE_SIZE,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Config {
    /// Load from ./medreg.toml (if present) and the environment
    pub fn load() -> CatalogResult<Self> {
        Self::load_from(None)
    }

    pub fn load_from(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            // First underscore separates section from key: PAGINATION_PAGE_SIZE
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replacen('_', ".", 1).into()));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if self.pagination.page_size == 0 {
            return Err(CatalogError::ConfigValidation {
                message: "pagination.page_size must be greater than 0".to_string(),
            });
        }
        if self.pagination.initial_page_size == 0 {
            return Err(CatalogError::ConfigValidation {
                message: "pagination.initial_page_size must be greater than 0".to_string(),
            });
        }
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(CatalogError::ConfigValidation {
                message: format!("server.bind '{}' is not a socket address", self.server.bind),
            });
        }
        Ok(())
    }

    pub fn cursor(&self) -> PageCursor {
        PageCursor::new(self.pagination.initial_page_size, self.pagination.page_size)
    }

    /// Built-in catalogs, or the configured directory's overrides
    pub fn load_catalogs(&self) -> CatalogResult<Catalogs> {
        match &self.catalog.data_dir {
            Some(dir) => Catalogs::load_dir(dir),
            None => Ok(Catalogs::with_defaults()),
        }
    }
}
