//! HTTP tests for the insurance policy and vehicle routes

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, build_test_app, corolla_body, policy_body};
use core_kernel::PolicyId;
use domain_insurance::PolicyStatus;

#[tokio::test]
async fn test_create_policy_returns_active_policy_with_vehicle_summary() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let response = app.post_json("/api/insurance", policy_body(vehicle_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["policyNumber"], "POL-2024-001");
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["vehicleId"], vehicle_id);
    assert_eq!(body["vehicleRegistration"], "ABC-123");
    assert_eq!(body["vehicleMake"], "Toyota");
    assert_eq!(body["vehicleModel"], "Corolla");
    assert_eq!(body["premiumAmount"], "500.00");
    assert_eq!(body["startDate"], "2024-01-01");
    assert_eq!(body["endDate"], "2024-12-31");
}

#[tokio::test]
async fn test_create_policy_ignores_requested_status() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let mut body = policy_body(vehicle_id);
    body["status"] = json!("CANCELLED");

    let response = app.post_json("/api/insurance", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["status"], "ACTIVE");
}

#[tokio::test]
async fn test_create_policy_with_end_before_start_is_rejected() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let mut body = policy_body(vehicle_id);
    body["endDate"] = json!("2023-12-31");

    let response = app.post_json("/api/insurance", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_range");
    assert_eq!(error["message"], "End date must be after start date");

    let list = body_json(app.get("/api/insurance").await).await;
    assert_eq!(list["totalItems"], 0);
}

#[tokio::test]
async fn test_create_policy_for_unknown_vehicle_is_not_found() {
    let app = build_test_app();

    let response = app.post_json("/api/insurance", policy_body(42)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn test_create_policy_without_number_is_a_validation_error() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let mut body = policy_body(vehicle_id);
    body.as_object_mut().unwrap().remove("policyNumber");

    let response = app.post_json("/api/insurance", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "validation_error");
}

#[tokio::test]
async fn test_create_policy_with_negative_premium_is_a_validation_error() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let mut body = policy_body(vehicle_id);
    body["premiumAmount"] = json!("-1.00");

    let response = app.post_json("/api/insurance", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_amounts_that_cannot_be_stored_exactly_are_rejected() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let mut sub_cent = policy_body(vehicle_id);
    sub_cent["premiumAmount"] = json!("500.005");
    let response = app.post_json("/api/insurance", sub_cent).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "validation_error");

    let mut overflow = policy_body(vehicle_id);
    overflow["deductibleAmount"] = json!("100000000000.00");
    let response = app.post_json("/api/insurance", overflow).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "validation_error");
}

#[tokio::test]
async fn test_update_with_sub_cent_premium_leaves_policy_unchanged() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    let id = app.create_policy(policy_body(vehicle_id)).await;

    let mut update = policy_body(vehicle_id);
    update["premiumAmount"] = json!("650.555");

    let response = app.put_json(&format!("/api/insurance/{id}"), update).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let stored = body_json(app.get(&format!("/api/insurance/{id}")).await).await;
    assert_eq!(stored["premiumAmount"], "500.00");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = build_test_app();

    let response = app
        .send(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/insurance")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_duplicate_policy_number_conflicts() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    app.create_policy(policy_body(vehicle_id)).await;

    let response = app.post_json("/api/insurance", policy_body(vehicle_id)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_policy_by_id_and_number() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    let id = app.create_policy(policy_body(vehicle_id)).await;

    let by_id = app.get(&format!("/api/insurance/{id}")).await;
    assert_eq!(by_id.status(), StatusCode::OK);
    assert_eq!(body_json(by_id).await["policyNumber"], "POL-2024-001");

    let by_number = app.get("/api/insurance/number/POL-2024-001").await;
    assert_eq!(by_number.status(), StatusCode::OK);
    assert_eq!(body_json(by_number).await["id"], id);

    let missing = app.get("/api/insurance/number/NOPE").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_policy_id_is_not_found_with_message() {
    let app = build_test_app();

    let response = app.get("/api/insurance/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error = body_json(response).await;
    assert_eq!(error["error"], "not_found");
    assert_eq!(error["message"], "Insurance policy not found with id: 99");
}

#[tokio::test]
async fn test_non_numeric_policy_id_is_a_bad_request() {
    let app = build_test_app();

    let response = app.get("/api/insurance/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_policy_changes_fields_but_keeps_number_and_status() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    let id = app.create_policy(policy_body(vehicle_id)).await;

    let mut update = policy_body(vehicle_id);
    update["policyNumber"] = json!("POL-OTHER");
    update["provider"] = json!("Beta Mutual");
    update["premiumAmount"] = json!("650.00");
    update["status"] = json!("EXPIRED");

    let response = app.put_json(&format!("/api/insurance/{id}"), update).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["policyNumber"], "POL-2024-001");
    assert_eq!(body["provider"], "Beta Mutual");
    assert_eq!(body["premiumAmount"], "650.00");
    assert_eq!(body["status"], "ACTIVE");
}

#[tokio::test]
async fn test_update_with_end_before_start_leaves_policy_unchanged() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    let id = app.create_policy(policy_body(vehicle_id)).await;

    let mut update = policy_body(vehicle_id);
    update["endDate"] = json!("2023-06-30");

    let response = app.put_json(&format!("/api/insurance/{id}"), update).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = body_json(app.get(&format!("/api/insurance/{id}")).await).await;
    assert_eq!(stored["endDate"], "2024-12-31");
}

#[tokio::test]
async fn test_update_cancelled_policy_is_rejected() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    let id = app.create_policy(policy_body(vehicle_id)).await;

    assert!(
        app.policy_port
            .set_status(PolicyId::new(id), PolicyStatus::Cancelled)
            .await
    );

    let mut update = policy_body(vehicle_id);
    update["provider"] = json!("Beta Mutual");

    let response = app.put_json(&format!("/api/insurance/{id}"), update).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid_state");
    assert_eq!(error["message"], "Cannot update expired or cancelled policy");

    let stored = body_json(app.get(&format!("/api/insurance/{id}")).await).await;
    assert_eq!(stored["provider"], "Acme Insurance");
    assert_eq!(stored["status"], "CANCELLED");
}

#[tokio::test]
async fn test_update_unknown_policy_is_not_found() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    let response = app
        .put_json("/api/insurance/77", policy_body(vehicle_id))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_policy_then_get_is_not_found() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    let id = app.create_policy(policy_body(vehicle_id)).await;

    let response = app.delete(&format!("/api/insurance/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        format!("Insurance policy deleted successfully with id: {id}")
    );

    let after = app.get(&format!("/api/insurance/{id}")).await;
    assert_eq!(after.status(), StatusCode::NOT_FOUND);

    let again = app.delete(&format!("/api/insurance/{id}")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

async fn seed_two_policies(app: &common::TestApp) -> i64 {
    let vehicle_id = app.create_corolla().await;

    let mut cheap = policy_body(vehicle_id);
    cheap["policyNumber"] = json!("P-CHEAP");
    cheap["premiumAmount"] = json!("100.00");
    app.create_policy(cheap).await;

    let mut pricey = policy_body(vehicle_id);
    pricey["policyNumber"] = json!("P-PRICEY");
    pricey["provider"] = json!("Zenith Cover");
    pricey["premiumAmount"] = json!("900.00");
    pricey["startDate"] = json!("2025-01-01");
    pricey["endDate"] = json!("2025-12-31");
    app.create_policy(pricey).await;

    vehicle_id
}

#[tokio::test]
async fn test_premium_range_is_inclusive_and_filters() {
    let app = build_test_app();
    seed_two_policies(&app).await;

    let response = app
        .get("/api/insurance/premium-range?minAmount=200&maxAmount=1000")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["items"][0]["premiumAmount"], "900.00");

    let edges = body_json(
        app.get("/api/insurance/premium-range?minAmount=100&maxAmount=900")
            .await,
    )
    .await;
    assert_eq!(edges["totalItems"], 2);
}

#[tokio::test]
async fn test_premium_range_with_min_above_max_is_rejected() {
    let app = build_test_app();

    let response = app
        .get("/api/insurance/premium-range?minAmount=1000&maxAmount=200")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_range");
}

#[tokio::test]
async fn test_premium_range_with_unparseable_amount_is_a_bad_request() {
    let app = build_test_app();

    let response = app
        .get("/api/insurance/premium-range?minAmount=cheap&maxAmount=200")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "bad_request");
}

#[tokio::test]
async fn test_provider_filter_is_case_insensitive_substring() {
    let app = build_test_app();
    seed_two_policies(&app).await;

    let body = body_json(app.get("/api/insurance/provider?provider=zen").await).await;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["items"][0]["policyNumber"], "P-PRICEY");
}

#[tokio::test]
async fn test_search_by_vehicle_details() {
    let app = build_test_app();
    seed_two_policies(&app).await;

    let hits = body_json(app.get("/api/insurance/search?searchTerm=corolla").await).await;
    assert_eq!(hits["totalItems"], 2);

    let misses = body_json(app.get("/api/insurance/search?searchTerm=xyz").await).await;
    assert_eq!(misses["totalItems"], 0);
    assert_eq!(misses["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_expiry_range_filter() {
    let app = build_test_app();
    seed_two_policies(&app).await;

    let body = body_json(
        app.get("/api/insurance/expiry-range?startDate=2025-06-01&endDate=2025-12-31")
            .await,
    )
    .await;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["items"][0]["policyNumber"], "P-PRICEY");

    let reversed = app
        .get("/api/insurance/expiry-range?startDate=2025-12-31&endDate=2025-01-01")
        .await;
    assert_eq!(reversed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_by_vehicle() {
    let app = build_test_app();
    let vehicle_id = seed_two_policies(&app).await;

    let body = body_json(app.get(&format!("/api/insurance/vehicle/{vehicle_id}")).await).await;
    assert_eq!(body["totalItems"], 2);

    let unknown = app.get("/api/insurance/vehicle/999").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_paging_envelope_and_sorting() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    for n in 1..=5 {
        let mut body = policy_body(vehicle_id);
        body["policyNumber"] = json!(format!("P-{n}"));
        body["premiumAmount"] = json!(format!("{}.00", n * 100));
        app.create_policy(body).await;
    }

    let page = body_json(app.get("/api/insurance?pageNo=1&pageSize=2").await).await;
    assert_eq!(page["currentPage"], 1);
    assert_eq!(page["totalItems"], 5);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["items"][0]["policyNumber"], "P-3");

    let sorted = body_json(
        app.get("/api/insurance?sortBy=premiumAmount&sortDir=DESC&pageSize=5")
            .await,
    )
    .await;
    assert_eq!(sorted["items"][0]["premiumAmount"], "500.00");
    assert_eq!(sorted["items"][4]["premiumAmount"], "100.00");

    let past_end = body_json(app.get("/api/insurance?pageNo=9&pageSize=2").await).await;
    assert_eq!(past_end["totalItems"], 5);
    assert_eq!(past_end["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_invalid_paging_parameters() {
    let app = build_test_app();

    let zero_size = app.get("/api/insurance?pageSize=0").await;
    assert_eq!(zero_size.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bad_sort = app.get("/api/insurance?sortBy=password").await;
    assert_eq!(bad_sort.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bad_number = app.get("/api/insurance?pageNo=abc").await;
    assert_eq!(bad_number.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_listings() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;

    // Ended in 2024
    let lapsed = app.create_policy(policy_body(vehicle_id)).await;

    let mut current = policy_body(vehicle_id);
    current["policyNumber"] = json!("POL-CURRENT");
    current["endDate"] = json!("2099-12-31");
    let current = app.create_policy(current).await;

    let mut cancelled = policy_body(vehicle_id);
    cancelled["policyNumber"] = json!("POL-CANCELLED");
    cancelled["endDate"] = json!("2099-12-31");
    let cancelled = app.create_policy(cancelled).await;
    assert!(
        app.policy_port
            .set_status(PolicyId::new(cancelled), PolicyStatus::Cancelled)
            .await
    );

    let active = body_json(app.get("/api/insurance/active").await).await;
    assert_eq!(active["totalItems"], 1);
    assert_eq!(active["items"][0]["id"], current);

    let expired = body_json(app.get("/api/insurance/expired").await).await;
    assert_eq!(expired["totalItems"], 1);
    assert_eq!(expired["items"][0]["id"], lapsed);

    let by_status = body_json(app.get("/api/insurance/status/cancelled").await).await;
    assert_eq!(by_status["totalItems"], 1);
    assert_eq!(by_status["items"][0]["policyNumber"], "POL-CANCELLED");

    let unknown = app.get("/api/insurance/status/PENDING").await;
    assert_eq!(unknown.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_vehicle_crud() {
    let app = build_test_app();
    let id = app.create_corolla().await;

    let fetched = body_json(app.get(&format!("/api/vehicles/{id}")).await).await;
    assert_eq!(fetched["registrationNumber"], "ABC-123");
    assert_eq!(fetched["ownerFirstName"], "John");

    let mut update = corolla_body();
    update["color"] = json!("Blue");
    let updated = app.put_json(&format!("/api/vehicles/{id}"), update).await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["color"], "Blue");

    let list = body_json(app.get("/api/vehicles").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let deleted = app.delete(&format!("/api/vehicles/{id}")).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        body_json(deleted).await["message"],
        format!("Vehicle deleted successfully with id: {id}")
    );
    assert_eq!(
        app.get(&format!("/api/vehicles/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_vehicle_with_invalid_email_is_a_validation_error() {
    let app = build_test_app();

    let mut body = corolla_body();
    body["ownerEmail"] = json!("not-an-email");

    let response = app.post_json("/api/vehicles", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_insured_vehicle_cannot_be_deleted() {
    let app = build_test_app();
    let vehicle_id = app.create_corolla().await;
    app.create_policy(policy_body(vehicle_id)).await;

    let response = app.delete(&format!("/api/vehicles/{vehicle_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "conflict");

    let still_there = app.get(&format!("/api/vehicles/{vehicle_id}")).await;
    assert_eq!(still_there.status(), StatusCode::OK);
}
