//! Infrastructure layer: storage adapters behind the products domain ports.

pub mod repository;


pub use repository::InMemoryProductRepository;
#[cfg(feature = "postgres")]
pub use repository::PostgresProductRepository;
