//! Insurance policy handlers (`/api/insurance`)

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::{Page, PolicyId, VehicleId};
use domain_insurance::{InsurancePolicy, PolicyStatus};

use crate::dto::page::{PageQuery, PageResponse};
use crate::dto::policy::*;
use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::AppState;

type PolicyPage = Json<PageResponse<PolicyResponse>>;

fn to_page(page: Page<InsurancePolicy>) -> PolicyPage {
    Json(PageResponse::from_page(page, PolicyResponse::from))
}

/// Creates a policy; the status is always ACTIVE
pub async fn create_policy(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    let input = request.into_create_input()?;
    let policy = state.policies.create_policy(input).await?;
    Ok((StatusCode::CREATED, Json(policy.into())))
}

pub async fn get_policy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.policies.get_policy_by_id(PolicyId::new(id)).await?;
    Ok(Json(policy.into()))
}

pub async fn get_policy_by_number(
    State(state): State<AppState>,
    ApiPath(number): ApiPath<String>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state.policies.get_policy_by_number(&number).await?;
    Ok(Json(policy.into()))
}

pub async fn list_policies(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    Ok(to_page(state.policies.get_all_policies(&request).await?))
}

pub async fn list_by_vehicle(
    State(state): State<AppState>,
    ApiPath(vehicle_id): ApiPath<i64>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    let page = state
        .policies
        .get_policies_by_vehicle(VehicleId::new(vehicle_id), &request)
        .await?;
    Ok(to_page(page))
}

pub async fn list_by_provider(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProviderQuery>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    let page = state
        .policies
        .get_policies_by_provider(&query.provider, &request)
        .await?;
    Ok(to_page(page))
}

pub async fn list_by_expiry_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ExpiryRangeQuery>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    let page = state
        .policies
        .get_policies_by_expiry_range(query.start_date, query.end_date, &request)
        .await?;
    Ok(to_page(page))
}

pub async fn list_by_status(
    State(state): State<AppState>,
    ApiPath(status): ApiPath<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let status: PolicyStatus = status.parse()?;
    let request = page.to_request()?;
    let page = state
        .policies
        .get_policies_by_status(status, &request)
        .await?;
    Ok(to_page(page))
}

pub async fn list_active(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    Ok(to_page(state.policies.get_active_policies(&request).await?))
}

pub async fn list_expired(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    Ok(to_page(state.policies.get_expired_policies(&request).await?))
}

/// Substring search over vehicle make, model and registration
pub async fn search_by_vehicle_details(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let request = page.to_request()?;
    let page = state
        .policies
        .search_policies_by_vehicle_details(&query.search_term, &request)
        .await?;
    Ok(to_page(page))
}

pub async fn list_by_premium_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PremiumRangeQuery>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<PolicyPage, ApiError> {
    let (min, max) = query.bounds()?;
    let request = page.to_request()?;
    let page = state
        .policies
        .get_policies_by_premium_range(min, max, &request)
        .await?;
    Ok(to_page(page))
}

pub async fn update_policy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<PolicyRequest>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state
        .policies
        .update_policy(PolicyId::new(id), request.into_update_input())
        .await?;
    Ok(Json(policy.into()))
}

pub async fn delete_policy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.policies.delete_policy(PolicyId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: format!("Insurance policy deleted successfully with id: {id}"),
    }))
}
