//! Test Utilities Crate
//!
//! Shared test infrastructure for the AutoVault workspace.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built vehicles, policies, and catalog records
//! - `builders`: Builders for policy and vehicle inputs
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for pages and policy lists
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
