//! Image handlers (`/api/images`)

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use core_kernel::ImageId;
use domain_catalog::ImageUpload;

use crate::dto::catalog::ImageResponse;
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::handlers::product::{malformed, payload_read};
use crate::AppState;

/// Stores the multipart part named `file`
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ImageResponse>), ApiError> {
    let upload = read_file_part(multipart).await?;
    let image = state.images.upload_image(upload).await?;
    Ok((StatusCode::CREATED, Json(image.into())))
}

/// All images with base64 data, or 204 when there are none
pub async fn list_images(State(state): State<AppState>) -> Result<Response, ApiError> {
    let images = state.images.list_images().await?;
    if images.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let body: Vec<ImageResponse> = images.into_iter().map(ImageResponse::from).collect();
    Ok(Json(body).into_response())
}

/// Raw image bytes served with the stored content type
pub async fn get_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    let image = state.images.get_image(ImageId::new(id)).await?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.data).into_response())
}

pub async fn update_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageResponse>, ApiError> {
    let upload = read_file_part(multipart).await?;
    let image = state.images.update_image(ImageId::new(id), upload).await?;
    Ok(Json(image.into()))
}

pub async fn delete_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.images.delete_image(ImageId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: format!("Image deleted successfully with id: {id}"),
    }))
}

async fn read_file_part(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ImageUpload, ApiError> {
    let mut multipart = multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(payload_read)?;
        return Ok(ImageUpload::new(name, content_type, data.to_vec()));
    }

    Err(ApiError::BadRequest("multipart part 'file' is required".to_string()))
}
