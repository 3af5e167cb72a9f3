//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the insurance and catalog domains using SQLx.
//!
//! # Architecture
//!
//! ```text
//! domain port trait  <-  adapters::Postgres*Adapter  ->  repositories::*Repository  ->  PgPool
//! ```
//!
//! Queries are built at runtime (`query_as` with `FromRow` rows, and
//! `QueryBuilder` for the filtered and sorted policy pages), so the crate
//! compiles without a live database. The schema ships as embedded
//! migrations under `migrations/`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//!
//! let pool = create_pool(DatabaseConfig::new(url)).await?;
//! run_migrations(&pool).await?;
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{
    PostgresImageAdapter, PostgresPolicyAdapter, PostgresProductAdapter, PostgresReviewAdapter,
    PostgresVehicleAdapter,
};
pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
