use std::collections::HashMap;
use std::sync::RwLock;

use mpassign_catalog::{Catalog, CatalogProduct};
use mpassign_core::ProductId;

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, product: CatalogProduct) {
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id, product);
        }
    }

    pub fn remove(&self, id: ProductId) {
        if let Ok(mut map) = self.products.write() {
            map.remove(&id);
        }
    }
}

impl Catalog for InMemoryCatalog {
    fn resolve_product(&self, id: ProductId) -> Option<CatalogProduct> {
        let map = self.products.read().ok()?;
        map.get(&id).cloned()
    }
}
