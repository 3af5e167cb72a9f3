//! Shared harness for the HTTP tests
//!
//! Builds the production router over in-memory ports and drives it with
//! `tower::ServiceExt::oneshot`, so no server or database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_catalog::ports::mock::{MockImagePort, MockProductPort, MockReviewPort};
use domain_catalog::{ImageService, ProductService, ReviewService};
use domain_insurance::ports::mock::{MockPolicyPort, MockVehiclePort};
use domain_insurance::{PolicyService, VehicleService};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};

const BOUNDARY: &str = "autovault-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub policy_port: Arc<MockPolicyPort>,
}

pub fn build_test_app() -> TestApp {
    let vehicle_port = Arc::new(MockVehiclePort::new());
    let policy_port = Arc::new(MockPolicyPort::new(vehicle_port.clone()));

    let state = AppState {
        policies: PolicyService::new(policy_port.clone(), vehicle_port.clone()),
        vehicles: VehicleService::new(vehicle_port, policy_port.clone()),
        products: ProductService::new(Arc::new(MockProductPort::new())),
        images: ImageService::new(Arc::new(MockImagePort::new())),
        reviews: ReviewService::new(Arc::new(MockReviewPort::new())),
        config: ApiConfig::default(),
    };

    TestApp {
        router: create_router(state),
        policy_port,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(empty_request(Method::GET, uri)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(empty_request(Method::DELETE, uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Method::POST, uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(json_request(Method::PUT, uri, body)).await
    }

    /// Creates the Toyota Corolla ABC-123 and returns its id
    pub async fn create_corolla(&self) -> i64 {
        let response = self.post_json("/api/vehicles", corolla_body()).await;
        assert_eq!(response.status(), 201);
        body_json(response).await["id"].as_i64().unwrap()
    }

    /// Creates a policy from `body` and returns its id
    pub async fn create_policy(&self, body: Value) -> i64 {
        let response = self.post_json("/api/insurance", body).await;
        assert_eq!(response.status(), 201);
        body_json(response).await["id"].as_i64().unwrap()
    }
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A multipart part: (field name, optional file name and content type, bytes)
pub struct Part<'a> {
    pub name: &'a str,
    pub file: Option<(&'a str, &'a str)>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file: Some((file_name, content_type)),
            data,
        }
    }
}

pub fn multipart_request(method: Method, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        part.name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn corolla_body() -> Value {
    json!({
        "make": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "registrationNumber": "ABC-123",
        "color": "Silver",
        "ownerFirstName": "John",
        "ownerLastName": "Smith",
        "ownerEmail": "john.smith@example.com"
    })
}

/// The 2024 policy P1 for `vehicle_id`, premium 500.00
pub fn policy_body(vehicle_id: i64) -> Value {
    json!({
        "policyNumber": "POL-2024-001",
        "provider": "Acme Insurance",
        "vehicleId": vehicle_id,
        "startDate": "2024-01-01",
        "endDate": "2024-12-31",
        "premiumAmount": "500.00",
        "coverageType": "COMPREHENSIVE",
        "deductibleAmount": "250.00",
        "notes": "first policy",
        "vehicleImage": "aW1hZ2U="
    })
}
