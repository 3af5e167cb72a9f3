//! Product reviews
//!
//! Reviews point at a product id without any referential check, so a review
//! may outlive the product it describes.

use core_kernel::{ProductId, ReviewId};

use crate::error::CatalogError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub comment: Option<String>,
    pub rating: i32,
    pub product_id: ProductId,
}

impl ReviewInput {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(CatalogError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub comment: Option<String>,
    pub rating: i32,
    pub product_id: ProductId,
}

impl Review {
    pub fn from_input(id: ReviewId, input: ReviewInput) -> Self {
        Self {
            id,
            comment: input.comment,
            rating: input.rating,
            product_id: input.product_id,
        }
    }

    pub fn apply(&mut self, input: ReviewInput) {
        self.comment = input.comment;
        self.rating = input.rating;
        self.product_id = input.product_id;
    }
}
