//! Domain Adapters
//!
//! PostgreSQL implementations of the domain port traits. Each adapter wraps
//! a repository, converts rows into domain types and reports failures as
//! `PortError`.
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresPolicyAdapter, PostgresVehicleAdapter};
//! use domain_insurance::PolicyService;
//! use std::sync::Arc;
//!
//! let service = PolicyService::new(
//!     Arc::new(PostgresPolicyAdapter::new(pool.clone())),
//!     Arc::new(PostgresVehicleAdapter::new(pool)),
//! );
//! ```

use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult};

pub mod catalog;
pub mod insurance;

pub use catalog::{PostgresImageAdapter, PostgresProductAdapter, PostgresReviewAdapter};
pub use insurance::{PostgresPolicyAdapter, PostgresVehicleAdapter};

/// Runs `SELECT 1` and reports the outcome for `adapter_id`
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await;

    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(_) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        },
        Err(e) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(format!("Database error: {}", e)),
            checked_at: Utc::now(),
        },
    }
}
