//! Review handlers (`/api/reviews`)

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::{ProductId, ReviewId};

use crate::dto::catalog::{ReviewRequest, ReviewResponse};
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let review = state.reviews.create_review(request.into()).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state.reviews.list_reviews().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

/// Reviews for a product id; unknown products simply have none
pub async fn list_by_product(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<i64>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = state
        .reviews
        .list_reviews_by_product(ProductId::new(product_id))
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

pub async fn update_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review = state
        .reviews
        .update_review(ReviewId::new(id), request.into())
        .await?;
    Ok(Json(review.into()))
}

pub async fn delete_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.reviews.delete_review(ReviewId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: format!("Review deleted successfully with id: {id}"),
    }))
}
