//! Products domain module.
//!
//! Business rules for the product catalog: the entity, the validated input
//! shape, and the service that sits between the HTTP layer and storage.
//! Storage itself is abstracted behind [`ProductRepository`].

pub mod data;
pub mod product;
pub mod repository;
pub mod service;

pub use data::{ProductAttributes, ProductData};
pub use product::Product;
pub use repository::{ProductRepository, RepositoryError};
pub use service::{ProductService, ProductServiceError};
