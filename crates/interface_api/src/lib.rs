//! HTTP API Layer
//!
//! REST API for vehicle insurance policies, vehicles, and the product
//! catalog, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One module per resource, thin wrappers over domain services
//! - **Middleware**: Request ids, request logging, tracing, CORS
//! - **DTOs**: camelCase request/response bodies with hand-written mapping
//! - **Error Handling**: Domain errors mapped to `{ error, message }` bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::with_postgres(pool, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_catalog::{ImageService, ProductService, ReviewService};
use domain_insurance::{PolicyService, VehicleService};
use infra_db::{
    PostgresImageAdapter, PostgresPolicyAdapter, PostgresProductAdapter, PostgresReviewAdapter,
    PostgresVehicleAdapter,
};

use crate::config::ApiConfig;
use crate::handlers::{health, image, policy, product, review, vehicle};
use crate::middleware::{request_logging, UuidRequestId, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub policies: PolicyService,
    pub vehicles: VehicleService,
    pub products: ProductService,
    pub images: ImageService,
    pub reviews: ReviewService,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires every service to its PostgreSQL adapter
    pub fn with_postgres(pool: PgPool, config: ApiConfig) -> Self {
        let vehicle_port = Arc::new(PostgresVehicleAdapter::new(pool.clone()));
        let policy_port = Arc::new(PostgresPolicyAdapter::new(pool.clone()));

        Self {
            policies: PolicyService::new(policy_port.clone(), vehicle_port.clone()),
            vehicles: VehicleService::new(vehicle_port, policy_port),
            products: ProductService::new(Arc::new(PostgresProductAdapter::new(pool.clone()))),
            images: ImageService::new(Arc::new(PostgresImageAdapter::new(pool.clone()))),
            reviews: ReviewService::new(Arc::new(PostgresReviewAdapter::new(pool))),
            config,
        }
    }
}

/// Creates the main API router
///
/// Upload routes (products and images) have axum's body limit disabled.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/health", get(health::health_check))
        .route("/api/health/details", get(health::health_details));

    let policy_routes = Router::new()
        .route("/", post(policy::create_policy).get(policy::list_policies))
        .route(
            "/:id",
            get(policy::get_policy)
                .put(policy::update_policy)
                .delete(policy::delete_policy),
        )
        .route("/number/:policy_number", get(policy::get_policy_by_number))
        .route("/vehicle/:vehicle_id", get(policy::list_by_vehicle))
        .route("/provider", get(policy::list_by_provider))
        .route("/expiry-range", get(policy::list_by_expiry_range))
        .route("/status/:status", get(policy::list_by_status))
        .route("/active", get(policy::list_active))
        .route("/expired", get(policy::list_expired))
        .route("/search", get(policy::search_by_vehicle_details))
        .route("/premium-range", get(policy::list_by_premium_range));

    let vehicle_routes = Router::new()
        .route("/", post(vehicle::create_vehicle).get(vehicle::list_vehicles))
        .route(
            "/:id",
            get(vehicle::get_vehicle)
                .put(vehicle::update_vehicle)
                .delete(vehicle::delete_vehicle),
        );

    let product_routes = Router::new()
        .route("/", post(product::create_product).get(product::list_products))
        .route(
            "/:id",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .layer(DefaultBodyLimit::disable());

    let image_routes = Router::new()
        .route("/", get(image::list_images))
        .route("/upload", post(image::upload_image))
        .route(
            "/:id",
            get(image::get_image)
                .put(image::update_image)
                .delete(image::delete_image),
        )
        .layer(DefaultBodyLimit::disable());

    let review_routes = Router::new()
        .route("/", post(review::create_review).get(review::list_reviews))
        .route(
            "/:id",
            axum::routing::put(review::update_review).delete(review::delete_review),
        )
        .route("/product/:product_id", get(review::list_by_product));

    let api_routes = Router::new()
        .nest("/insurance", policy_routes)
        .nest("/vehicles", vehicle_routes)
        .nest("/products", product_routes)
        .nest("/images", image_routes)
        .nest("/reviews", review_routes);

    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, UuidRequestId))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
