//! Request handlers, one module per resource

pub mod health;
pub mod image;
pub mod policy;
pub mod product;
pub mod review;
pub mod vehicle;
