//! Core Kernel - Foundational types shared by the AutoVault services
//!
//! This crate provides the building blocks used by every domain module:
//! - Strongly-typed entity identifiers
//! - Paging and sorting primitives for list queries
//! - Checks for stored monetary amounts
//! - Port contracts (error type, health checks) implemented by adapters

pub mod amount;
pub mod identifiers;
pub mod pagination;
pub mod ports;
pub mod error;

pub use identifiers::{VehicleId, PolicyId, ProductId, ImageId, ReviewId};
pub use pagination::{
    Page, PageRequest, Sort, SortDirection, paginate,
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE,
};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
pub use amount::{validate_amount, max_amount, AMOUNT_SCALE};
