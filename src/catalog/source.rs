use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::catalog::product::{Product, ProductId};
use crate::error::{Error, Result};

const DEMO_CATALOG: &str = include_str!("../../demos/catalog.json");

/// Read-only access to the product collection. Caching and revalidation are
/// the implementor's business.
pub trait ProductSource {
    fn list_products(&self) -> Result<Arc<[Product]>>;

    fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self
            .list_products()?
            .iter()
            .find(|product| &product.id == id)
            .cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Arc<[Product]>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// The bundled demo collection.
    pub fn demo() -> Result<Self> {
        let products = parse_products(DEMO_CATALOG, Path::new("demos/catalog.json"))?;
        Ok(Self::new(products))
    }

    /// Swaps the collection, as a remote write followed by a refetch would.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products.into();
    }
}

impl ProductSource for MemoryCatalog {
    fn list_products(&self) -> Result<Arc<[Product]>> {
        Ok(Arc::clone(&self.products))
    }
}

/// Products stored as a JSON array on disk. Every listing re-reads the file.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductSource for JsonCatalog {
    fn list_products(&self) -> Result<Arc<[Product]>> {
        let raw = fs::read_to_string(&self.path)?;
        let products = parse_products(&raw, &self.path)?;
        info!(path = %self.path.display(), count = products.len(), "catalog loaded");
        Ok(products.into())
    }
}

fn parse_products(raw: &str, path: &Path) -> Result<Vec<Product>> {
    serde_json::from_str(raw).map_err(|source| Error::Catalog {
        path: path.to_path_buf(),
        source,
    })
}
