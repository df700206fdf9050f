//! `ProductRepository` adapters.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
#[cfg(feature = "postgres")]
pub use postgres::PostgresProductRepository;
