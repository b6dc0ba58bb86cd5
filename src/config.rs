use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
    pub routes: RoutesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub detail_guard_ms: u64,
    pub query_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            detail_guard_ms: 100,
            query_key: "q".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn detail_guard(&self) -> Duration {
        Duration::from_millis(self.detail_guard_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub items_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { items_per_page: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    pub home: String,
    pub listing: String,
    pub about: String,
    pub contact: String,
    pub cart: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            listing: "/products".to_string(),
            about: "/about".to_string(),
            contact: "/contact".to_string(),
            cart: "/cart".to_string(),
        }
    }
}

impl Config {
    /// Reads a YAML config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pagination.items_per_page == 0 {
            return Err(Error::InvalidConfig(
                "pagination.items_per_page must be greater than zero".to_string(),
            ));
        }
        if self.search.debounce_ms == 0 {
            return Err(Error::InvalidConfig(
                "search.debounce_ms must be greater than zero".to_string(),
            ));
        }
        if self.search.query_key.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "search.query_key must not be empty".to_string(),
            ));
        }
        let routes = [
            ("home", &self.routes.home),
            ("listing", &self.routes.listing),
            ("about", &self.routes.about),
            ("contact", &self.routes.contact),
            ("cart", &self.routes.cart),
        ];
        for (name, path) in routes {
            if !path.starts_with('/') {
                return Err(Error::InvalidConfig(format!(
                    "routes.{name} must start with '/', got {path:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn items_per_page(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.pagination.items_per_page).unwrap_or(NonZeroUsize::MIN)
    }
}
