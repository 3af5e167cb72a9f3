//! Product handlers (`/api/products`)
//!
//! Create and update take `multipart/form-data` with text parts `name`,
//! `price`, `description` and an optional file part `image`.

use std::str::FromStr;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;

use core_kernel::ProductId;
use domain_catalog::ProductInput;

use crate::dto::catalog::ProductResponse;
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let input = read_product_form(multipart).await?;
    let product = state.products.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// All products, or 204 when there are none
pub async fn list_products(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state.products.list_products().await?;
    if products.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(Json(body).into_response())
}

pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get_product(ProductId::new(id)).await?;
    Ok(Json(product.into()))
}

/// Replaces name, price and description; the image only when a new one is sent
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let input = read_product_form(multipart).await?;
    let product = state
        .products
        .update_product(ProductId::new(id), input)
        .await?;
    Ok(Json(product.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.products.delete_product(ProductId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: format!("Product deleted successfully with id: {id}"),
    }))
}

async fn read_product_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ProductInput, ApiError> {
    let mut multipart = multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let mut input = ProductInput::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => input.name = field.text().await.map_err(payload_read)?,
            "price" => {
                let raw = field.text().await.map_err(payload_read)?;
                input.price = parse_price(&raw)?;
            }
            "description" => {
                let text = field.text().await.map_err(payload_read)?;
                input.description = Some(text).filter(|t| !t.is_empty());
            }
            "image" => {
                let bytes = field.bytes().await.map_err(payload_read)?;
                if !bytes.is_empty() {
                    input.image_data = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(input)
}

fn parse_price(raw: &str) -> Result<Option<Decimal>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw)
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("price must be a decimal number, got '{raw}'")))
}

pub(crate) fn malformed(err: MultipartError) -> ApiError {
    ApiError::BadRequest(err.body_text())
}

pub(crate) fn payload_read(err: MultipartError) -> ApiError {
    ApiError::PayloadRead(err.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 19.99 ").unwrap(), Some(dec!(19.99)));
        assert_eq!(parse_price("").unwrap(), None);
        assert!(matches!(parse_price("cheap"), Err(ApiError::BadRequest(_))));
    }
}
