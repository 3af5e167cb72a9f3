//! Catalog products
//!
//! A product carries an optional image payload stored inline with the row.

use rust_decimal::Decimal;

use core_kernel::{validate_amount, ProductId};

use crate::error::CatalogError;

/// Caller-supplied product fields
///
/// On update a `None` image keeps the stored image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductInput {
    pub name: String,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image_data: Option<Vec<u8>>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::validation("name must not be blank"));
        }
        if let Some(price) = self.price {
            validate_amount("price", price)?;
        }
        Ok(())
    }
}

/// A stored product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image_data: Option<Vec<u8>>,
}

impl Product {
    pub fn from_input(id: ProductId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            description: input.description,
            image_data: input.image_data,
        }
    }

    /// Overwrites name, price and description; replaces the image only when
    /// a new one is supplied
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        self.description = input.description;
        if let Some(image) = input.image_data {
            self.image_data = Some(image);
        }
    }
}
