use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use shopfront_core::ProductId;

use crate::{Product, ProductAttributes};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached or rejected the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be turned back into a [`Product`].
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence port for products.
///
/// `update` and `delete` return `None` when the id does not exist; the caller
/// decides whether that is an error.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ascending by id.
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Store a new product under a freshly assigned id.
    async fn insert(&self, attributes: ProductAttributes) -> Result<Product, RepositoryError>;

    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError>;

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn insert(&self, attributes: ProductAttributes) -> Result<Product, RepositoryError> {
        (**self).insert(attributes).await
    }

    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).delete(id).await
    }
}
