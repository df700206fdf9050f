use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use shopfront_core::ProductId;
use shopfront_products::{Product, ProductAttributes, ProductRepository, RepositoryError};

#[derive(Debug)]
struct State {
    products: BTreeMap<ProductId, Product>,
    next_id: u64,
}

/// In-memory product store for tests/dev.
///
/// Ids start at 1 and only ever grow; a deleted id is never handed out again.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<State>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Unavailable("product store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Unavailable("product store lock poisoned".into()))
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.read()?.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    async fn insert(&self, attributes: ProductAttributes) -> Result<Product, RepositoryError> {
        let mut state = self.write()?;
        let id = ProductId::new(state.next_id);
        state.next_id += 1;

        let product = Product::new(id, attributes);
        state.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
        let mut state = self.write()?;
        match state.products.get_mut(&product.id_typed()) {
            Some(slot) => {
                *slot = product.clone();
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.write()?.products.remove(&id))
    }
}
