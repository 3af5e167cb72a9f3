//! Catalog Domain
//!
//! Products (with an optional inline image), standalone stored images and
//! product reviews. Each entity follows the same shape: an input type that
//! validates caller data, a stored type, a storage port and a CRUD service.

pub mod error;
pub mod image;
pub mod ports;
pub mod product;
pub mod review;
pub mod services;

pub use error::CatalogError;
pub use image::{Image, ImageUpload, DEFAULT_CONTENT_TYPE};
pub use ports::{ImagePort, ProductPort, ReviewPort};
pub use product::{Product, ProductInput};
pub use review::{Review, ReviewInput};
pub use services::{ImageService, ProductService, ReviewService};
