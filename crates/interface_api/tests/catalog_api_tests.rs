//! HTTP tests for products, images and reviews

mod common;

use axum::http::{header, Method, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use common::{body_bytes, body_json, build_test_app, multipart_request, Part};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[tokio::test]
async fn test_empty_product_and_image_lists_are_no_content() {
    let app = build_test_app();

    let products = app.get("/api/products").await;
    assert_eq!(products.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(products).await.is_empty());

    let images = app.get("/api/images").await;
    assert_eq!(images.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_product_create_list_and_get() {
    let app = build_test_app();

    let response = app
        .send(multipart_request(
            Method::POST,
            "/api/products",
            &[
                Part::text("name", "Roof box"),
                Part::text("price", "129.90"),
                Part::text("description", "420 litres"),
                Part::file("image", "box.png", "image/png", PNG_BYTES),
            ],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["name"], "Roof box");
    assert_eq!(created["price"], "129.90");
    assert_eq!(created["image"], STANDARD.encode(PNG_BYTES));
    let id = created["id"].as_i64().unwrap();

    let list = body_json(app.get("/api/products").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let fetched = body_json(app.get(&format!("/api/products/{id}")).await).await;
    assert_eq!(fetched["description"], "420 litres");
}

#[tokio::test]
async fn test_product_update_keeps_image_when_none_sent() {
    let app = build_test_app();

    let created = body_json(
        app.send(multipart_request(
            Method::POST,
            "/api/products",
            &[
                Part::text("name", "Roof box"),
                Part::file("image", "box.png", "image/png", PNG_BYTES),
            ],
        ))
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .send(multipart_request(
            Method::PUT,
            &format!("/api/products/{id}"),
            &[Part::text("name", "Cargo box"), Part::text("price", "99")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Cargo box");
    assert_eq!(updated["price"], "99");
    assert_eq!(updated["image"], STANDARD.encode(PNG_BYTES));
}

#[tokio::test]
async fn test_product_without_name_is_a_validation_error() {
    let app = build_test_app();

    let response = app
        .send(multipart_request(
            Method::POST,
            "/api/products",
            &[Part::text("price", "10")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_product_with_unparseable_price_is_a_bad_request() {
    let app = build_test_app();

    let response = app
        .send(multipart_request(
            Method::POST,
            "/api/products",
            &[Part::text("name", "Mat"), Part::text("price", "cheap")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_delete_and_missing_lookups() {
    let app = build_test_app();

    assert_eq!(app.get("/api/products/5").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/api/products/5").await.status(), StatusCode::NOT_FOUND);

    let created = body_json(
        app.send(multipart_request(
            Method::POST,
            "/api/products",
            &[Part::text("name", "Mat")],
        ))
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let deleted = app.delete(&format!("/api/products/{id}")).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        body_json(deleted).await["message"],
        format!("Product deleted successfully with id: {id}")
    );
    assert_eq!(app.get("/api/products").await.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_image_upload_then_download_raw_bytes() {
    let app = build_test_app();

    let response = app
        .send(multipart_request(
            Method::POST,
            "/api/images/upload",
            &[Part::file("file", "dash.png", "image/png", PNG_BYTES)],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["name"], "dash.png");
    assert_eq!(created["contentType"], "image/png");
    assert_eq!(created["data"], STANDARD.encode(PNG_BYTES));
    let id = created["id"].as_i64().unwrap();

    let download = app.get(&format!("/api/images/{id}")).await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(download.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(&body_bytes(download).await[..], PNG_BYTES);

    let list = body_json(app.get("/api/images").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_image_update_and_delete() {
    let app = build_test_app();

    let created = body_json(
        app.send(multipart_request(
            Method::POST,
            "/api/images/upload",
            &[Part::file("file", "a.png", "image/png", PNG_BYTES)],
        ))
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let updated = app
        .send(multipart_request(
            Method::PUT,
            &format!("/api/images/{id}"),
            &[Part::file("file", "b.jpg", "image/jpeg", b"jpeg-bytes")],
        ))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["contentType"], "image/jpeg");

    let deleted = app.delete(&format!("/api/images/{id}")).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        app.get(&format!("/api/images/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_image_upload_without_file_part_is_a_bad_request() {
    let app = build_test_app();

    let response = app
        .send(multipart_request(
            Method::POST,
            "/api/images/upload",
            &[Part::text("caption", "no file here")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_upload_with_json_body_is_a_bad_request() {
    let app = build_test_app();

    let response = app.post_json("/api/images/upload", json!({"file": "x"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_lifecycle() {
    let app = build_test_app();

    let response = app
        .post_json(
            "/api/reviews",
            json!({"comment": "Fits well", "rating": 5, "productId": 1}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    app.post_json("/api/reviews", json!({"rating": 3, "productId": 2}))
        .await;

    let all = body_json(app.get("/api/reviews").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let for_product = body_json(app.get("/api/reviews/product/1").await).await;
    assert_eq!(for_product.as_array().unwrap().len(), 1);
    assert_eq!(for_product[0]["comment"], "Fits well");

    let updated = app
        .put_json(
            &format!("/api/reviews/{id}"),
            json!({"comment": "Rattles", "rating": 2, "productId": 1}),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["rating"], 2);

    let deleted = app.delete(&format!("/api/reviews/{id}")).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let for_product = body_json(app.get("/api/reviews/product/1").await).await;
    assert!(for_product.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_review_rating_out_of_range_is_a_validation_error() {
    let app = build_test_app();

    let response = app
        .post_json("/api/reviews", json!({"rating": 6, "productId": 1}))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "validation_error");
}

#[tokio::test]
async fn test_update_unknown_review_is_not_found() {
    let app = build_test_app();

    let response = app
        .put_json("/api/reviews/404", json!({"rating": 4, "productId": 1}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
