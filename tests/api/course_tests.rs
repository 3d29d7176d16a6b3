//! Course API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{fake_title, token_for, TestApp};

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/courses").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], 10003);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    app.server
        .get("/api/v1/courses")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_courses() {
    let app = TestApp::new();
    let first = app.create_course("Intro to Figma").await;
    let second = app.create_course("Brand strategy").await;

    let response = app
        .server
        .get("/api/v1/courses")
        .authorization_bearer(&app.token)
        .await;

    response.assert_status_ok();
    let ids: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    // newest first
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn test_course_of_other_instructor_is_not_found() {
    let app = TestApp::new();
    let course_id = app.create_course(&fake_title()).await;

    let response = app
        .server
        .get(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(token_for("someone_else"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_course_id_is_bad_request() {
    let app = TestApp::new();

    app.server
        .get("/api/v1/courses/not-a-uuid")
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_short_title_is_validation_error() {
    let app = TestApp::new();
    let category = &app.store.categories()[0];

    let response = app
        .server
        .post("/api/v1/courses")
        .authorization_bearer(&app.token)
        .json(&json!({
            "title": "A",
            "categoryId": category.id,
            "subCategoryId": category.sub_categories[0].id,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], 10007);
    assert!(body["message"].as_str().unwrap().starts_with("title"));
}

#[tokio::test]
async fn test_subcategory_must_belong_to_category() {
    let app = TestApp::new();
    let design = &app.store.categories()[0];
    let business = &app.store.categories()[1];

    let response = app
        .server
        .post("/api/v1/courses")
        .authorization_bearer(&app.token)
        .json(&json!({
            "title": "Logo design",
            "categoryId": design.id,
            "subCategoryId": business.sub_categories[0].id,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_course_metadata() {
    let app = TestApp::new();
    let course_id = app.create_course(&fake_title()).await;
    let business = &app.store.categories()[1];
    let level = &app.store.levels()[0];

    let response = app
        .server
        .patch(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(&app.token)
        .json(&json!({
            "subtitle": "From zero to launch",
            "categoryId": business.id,
            "subCategoryId": business.sub_categories[1].id,
            "levelId": level.id,
            "price": 19.99,
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["categoryId"], business.id.to_string());
    assert_eq!(body["subCategoryId"], business.sub_categories[1].id.to_string());
    assert_eq!(body["levelId"], level.id.to_string());
    assert_eq!(body["price"], 19.99);
}

#[tokio::test]
async fn test_category_change_keeping_stale_subcategory_is_rejected() {
    let app = TestApp::new();
    let course_id = app.create_course(&fake_title()).await;
    let business = &app.store.categories()[1];

    app.server
        .patch(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(&app.token)
        .json(&json!({ "categoryId": business.id }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let app = TestApp::new();
    let course_id = app.create_course(&fake_title()).await;

    app.server
        .patch(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(&app.token)
        .json(&json!({ "price": -5.0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_course_includes_sections_in_order() {
    let app = TestApp::new();
    let (course_id, _) = app.course_with_abc().await;

    let response = app
        .server
        .get(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(&app.token)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let positions: Vec<i64> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_delete_course_removes_curriculum() {
    let app = TestApp::new();
    let (course_id, _) = app.course_with_abc().await;

    app.server
        .delete(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/v1/courses/{}", course_id))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(app.store.positions(course_id.parse().unwrap()).is_empty());
}

#[tokio::test]
async fn test_body_of_wrong_shape_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/courses")
        .authorization_bearer(&app.token)
        .json(&json!({ "title": 42, "categoryId": "design" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10007);
}

#[tokio::test]
async fn test_body_that_is_not_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/courses")
        .authorization_bearer(&app.token)
        .text("{ \"title\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], 10002);
}

#[tokio::test]
async fn test_course_becomes_complete_when_required_fields_are_filled() {
    let app = TestApp::new();
    let course_id = app.create_course(&fake_title()).await;
    let path = format!("/api/v1/courses/{}", course_id);

    let draft = app.server.get(&path).authorization_bearer(&app.token).await;
    let body = draft.json::<Value>();
    assert_eq!(body["requiredFields"], 8);
    assert_eq!(
        body["missingFields"],
        json!(["description", "imageUrl", "levelId", "price", "sections"])
    );
    assert_eq!(body["isComplete"], false);

    app.server
        .patch(&path)
        .authorization_bearer(&app.token)
        .json(&json!({
            "description": "<p>Everything about kerning</p>",
            "imageUrl": "https://img.example.com/cover.png",
            "levelId": app.store.levels()[0].id,
            "price": 19.9,
        }))
        .await
        .assert_status_ok();
    app.create_section(&course_id, "Welcome").await;

    let body = app.server.get(&path).authorization_bearer(&app.token).await.json::<Value>();
    assert_eq!(body["missingFields"], json!([]));
    assert_eq!(body["isComplete"], true);
}
