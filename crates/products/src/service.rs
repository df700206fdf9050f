use std::sync::Arc;

use thiserror::Error;

use shopfront_core::ProductId;

use crate::{Product, ProductAttributes, ProductRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ProductServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Catalog operations over a [`ProductRepository`].
///
/// Input arrives as [`ProductAttributes`], so validation has already
/// happened by the time any method here runs.
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, ProductServiceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductServiceError::NotFound(id))
    }

    pub async fn create_product(
        &self,
        attributes: ProductAttributes,
    ) -> Result<Product, ProductServiceError> {
        let product = self.repository.insert(attributes).await?;
        tracing::debug!(product_id = %product.id_typed(), "product created");
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        attributes: ProductAttributes,
    ) -> Result<Product, ProductServiceError> {
        let mut product = self.get_product(id).await?;
        product.change_with(attributes);

        // A concurrent delete between the read and the write also lands here.
        let updated = self
            .repository
            .update(product)
            .await?
            .ok_or(ProductServiceError::NotFound(id))?;
        tracing::debug!(product_id = %id, "product updated");
        Ok(updated)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<Product, ProductServiceError> {
        let removed = self
            .repository
            .delete(id)
            .await?
            .ok_or(ProductServiceError::NotFound(id))?;
        tracing::debug!(product_id = %id, "product deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Single-slot repository that records which operations were called.
    #[derive(Default)]
    struct Recording {
        slot: Mutex<Option<Product>>,
        calls: Mutex<Vec<&'static str>>,
        vanish_on_update: bool,
    }

    impl Recording {
        fn with(product: Product) -> Self {
            Self {
                slot: Mutex::new(Some(product)),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductRepository for Recording {
        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            self.calls.lock().unwrap().push("find_all");
            Ok(self.slot.lock().unwrap().iter().cloned().collect())
        }

        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            self.calls.lock().unwrap().push("find_by_id");
            Ok(self
                .slot
                .lock()
                .unwrap()
                .clone()
                .filter(|p| p.id_typed() == id))
        }

        async fn insert(&self, attributes: ProductAttributes) -> Result<Product, RepositoryError> {
            self.calls.lock().unwrap().push("insert");
            let product = Product::new(ProductId::new(1), attributes);
            *self.slot.lock().unwrap() = Some(product.clone());
            Ok(product)
        }

        async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
            self.calls.lock().unwrap().push("update");
            if self.vanish_on_update {
                return Ok(None);
            }
            *self.slot.lock().unwrap() = Some(product.clone());
            Ok(Some(product))
        }

        async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            self.calls.lock().unwrap().push("delete");
            let mut slot = self.slot.lock().unwrap();
            if slot.as_ref().is_some_and(|p| p.id_typed() == id) {
                return Ok(slot.take());
            }
            Ok(None)
        }
    }

    struct Broken;

    #[async_trait]
    impl ProductRepository for Broken {
        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".into()))
        }

        async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".into()))
        }

        async fn insert(&self, _attributes: ProductAttributes) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".into()))
        }

        async fn update(&self, _product: Product) -> Result<Option<Product>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".into()))
        }

        async fn delete(&self, _id: ProductId) -> Result<Option<Product>, RepositoryError> {
            Err(RepositoryError::Unavailable("connection refused".into()))
        }
    }

    fn attrs(name: &str) -> ProductAttributes {
        ProductAttributes::new(name, "Acme", 5000, None).unwrap()
    }

    fn stored() -> Product {
        Product::new(ProductId::new(1), attrs("Mouse toy"))
    }

    #[tokio::test]
    async fn get_product_maps_missing_id_to_not_found() {
        let service = ProductService::new(Arc::new(Recording::with(stored())));

        let err = service.get_product(ProductId::new(99)).await.unwrap_err();
        assert!(matches!(err, ProductServiceError::NotFound(id) if id == ProductId::new(99)));
    }

    #[tokio::test]
    async fn update_of_unknown_id_never_writes() {
        let repo = Arc::new(Recording::with(stored()));
        let service = ProductService::new(repo.clone());

        let err = service
            .update_product(ProductId::new(2), attrs("Ball"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductServiceError::NotFound(_)));
        assert_eq!(repo.calls(), vec!["find_by_id"]);
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let repo = Arc::new(Recording::with(stored()));
        let service = ProductService::new(repo.clone());

        let updated = service
            .update_product(ProductId::new(1), attrs("Ball"))
            .await
            .unwrap();

        assert_eq!(updated.id_typed(), ProductId::new(1));
        assert_eq!(updated.name(), "Ball");
        assert_eq!(repo.calls(), vec!["find_by_id", "update"]);
    }

    #[tokio::test]
    async fn update_racing_a_delete_is_not_found() {
        let repo = Arc::new(Recording {
            vanish_on_update: true,
            ..Recording::with(stored())
        });
        let service = ProductService::new(repo);

        let err = service
            .update_product(ProductId::new(1), attrs("Ball"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_returns_removed_product_then_not_found() {
        let service = ProductService::new(Arc::new(Recording::with(stored())));

        let removed = service.delete_product(ProductId::new(1)).await.unwrap();
        assert_eq!(removed, stored());

        let err = service.delete_product(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, ProductServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn storage_failures_surface_as_repository_errors() {
        let service = ProductService::new(Arc::new(Broken));

        assert!(matches!(
            service.get_products().await,
            Err(ProductServiceError::Repository(RepositoryError::Unavailable(_)))
        ));
        assert!(matches!(
            service.create_product(attrs("Ball")).await,
            Err(ProductServiceError::Repository(_))
        ));
    }
}
