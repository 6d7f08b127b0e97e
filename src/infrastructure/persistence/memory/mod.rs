//! In-memory repository adapters
//!
//! State lives behind `tokio::sync::RwLock`, so reads from concurrent
//! authentications proceed in parallel.

pub mod tenant_repository;
pub mod user_repository;

pub use tenant_repository::InMemoryTenantRepository;
pub use user_repository::InMemoryUserRepository;
