//! Repository implementations
//!
//! Repositories own the SQL. They speak in row types and `DatabaseError`;
//! the adapters in `crate::adapters` turn both into domain terms.

pub mod catalog;
pub mod policy;
pub mod vehicle;

pub use catalog::{ImageRepository, ProductRepository, ReviewRepository};
pub use policy::PolicyRepository;
pub use vehicle::VehicleRepository;
