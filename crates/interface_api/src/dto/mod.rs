//! Request and response bodies
//!
//! Conversions between wire and domain types are written out by hand per
//! entity. All JSON is camelCase.

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod page;
pub mod policy;
pub mod vehicle;

/// `{ "message": ... }` confirmation returned by deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
