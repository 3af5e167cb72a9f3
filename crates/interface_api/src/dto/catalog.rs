//! Product, image and review DTOs
//!
//! Binary payloads travel as standard base64 inside JSON.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ProductId;
use domain_catalog::{Image, Product, Review, ReviewInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.value(),
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image_data.map(|bytes| STANDARD.encode(bytes)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: i64,
    pub name: String,
    pub content_type: String,
    pub data: String,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            id: image.id.value(),
            name: image.name,
            content_type: image.content_type,
            data: STANDARD.encode(image.data),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub comment: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub product_id: i64,
}

impl From<ReviewRequest> for ReviewInput {
    fn from(request: ReviewRequest) -> Self {
        ReviewInput {
            comment: request.comment,
            rating: request.rating,
            product_id: ProductId::new(request.product_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i64,
    pub comment: Option<String>,
    pub rating: i32,
    pub product_id: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.value(),
            comment: review.comment,
            rating: review.rating,
            product_id: review.product_id.value(),
        }
    }
}
