//! Vehicle Insurance Domain
//!
//! This crate holds the insurance policy and vehicle model, the storage
//! ports they are persisted through, and the services that enforce the
//! domain rules. It has no knowledge of HTTP or SQL.
//!
//! # Policy Lifecycle
//!
//! ```text
//! ACTIVE -> EXPIRED
//!        \-> CANCELLED
//! ```
//!
//! Policies are created ACTIVE and only ACTIVE policies can be updated.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_insurance::{PolicyService, PolicyInput};
//!
//! let service = PolicyService::new(policy_port, vehicle_port);
//! let policy = service.create_policy(input).await?;
//! assert_eq!(policy.status, PolicyStatus::Active);
//! ```

pub mod error;
pub mod policy;
pub mod ports;
pub mod services;
pub mod vehicle;

pub use error::InsuranceError;
pub use policy::{
    CoverageAmounts, InsurancePolicy, PolicyDraft, PolicyFilter, PolicyInput, PolicyPageRequest,
    PolicySortField, PolicyStatus,
};
pub use ports::{PolicyPort, VehiclePort};
pub use services::{PolicyService, VehicleService};
pub use vehicle::{Vehicle, VehicleDetails, VehicleOwner};
