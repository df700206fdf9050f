//! Storage and service wiring.

use std::sync::Arc;

use shopfront_infra::InMemoryProductRepository;
use shopfront_products::{ProductRepository, ProductService, RepositoryError};

use crate::config::ApiConfig;

/// Long-lived services shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService,
}

impl AppServices {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            products: ProductService::new(repository),
        }
    }

    /// In-memory storage (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::new()))
    }
}

/// Pick the repository from configuration: Postgres when `DATABASE_URL` is set.
pub async fn build_services(config: &ApiConfig) -> Result<AppServices, RepositoryError> {
    match &config.database_url {
        None => {
            tracing::info!("using in-memory product store");
            Ok(AppServices::in_memory())
        }
        Some(url) => build_persistent_services(url).await,
    }
}

#[cfg(feature = "postgres")]
async fn build_persistent_services(database_url: &str) -> Result<AppServices, RepositoryError> {
    let repository = shopfront_infra::PostgresProductRepository::connect(database_url).await?;
    repository.migrate().await?;
    tracing::info!("using postgres product store");
    Ok(AppServices::new(Arc::new(repository)))
}

#[cfg(not(feature = "postgres"))]
async fn build_persistent_services(_database_url: &str) -> Result<AppServices, RepositoryError> {
    Err(RepositoryError::Unavailable(
        "DATABASE_URL is set but this build lacks the `postgres` feature".to_string(),
    ))
}
