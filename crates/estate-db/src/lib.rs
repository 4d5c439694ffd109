//! # estate-db
//!
//! Database layer implementing the repository traits from `estate-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema setup for PostgreSQL
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repository implementations
//! - An in-memory backend implementing the same traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_db::pool::{apply_schema, create_pool, PoolConfig};
//! use estate_db::PgOfferRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     apply_schema(&pool).await?;
//!     let offer_repo = PgOfferRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryCommentRepository, MemoryOfferRepository, MemoryStore, MemoryUserRepository};
pub use pool::{apply_schema, create_pool, PgPool, PoolConfig};
pub use repositories::{PgCommentRepository, PgOfferRepository, PgUserRepository};
