pub mod app;
pub mod config;
pub mod error;
pub mod http_client;
pub mod memory_storage;
pub mod redis_storage;
pub mod setup;

pub use error::InfraError;
