//! Reorder API Tests
//!
//! Drag-and-drop reordering submits the full new order of a course's
//! sections; it is applied entirely or not at all.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_drag_last_section_to_front() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;

    let response = app
        .reorder(
            &course_id,
            json!([
                { "id": c, "position": 0 },
                { "id": a, "position": 1 },
                { "id": b, "position": 2 },
            ]),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["reordered"], 3);
    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section C", "Section A", "Section B"]
    );
}

#[tokio::test]
async fn test_reorder_is_idempotent() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;
    let batch = json!([
        { "id": b, "position": 0 },
        { "id": c, "position": 1 },
        { "id": a, "position": 2 },
    ]);

    app.reorder(&course_id, batch.clone()).await.assert_status_ok();
    app.reorder(&course_id, batch).await.assert_status_ok();

    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section B", "Section C", "Section A"]
    );
}

#[tokio::test]
async fn test_append_after_reorder_takes_next_position() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;
    app.reorder(
        &course_id,
        json!([
            { "id": c, "position": 0 },
            { "id": a, "position": 1 },
            { "id": b, "position": 2 },
        ]),
    )
    .await
    .assert_status_ok();

    app.create_section(&course_id, "Section D").await;

    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section C", "Section A", "Section B", "Section D"]
    );
}

#[tokio::test]
async fn test_write_interrupted_mid_batch_leaves_order_unchanged() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;
    // two of the three rows are written before the store goes away
    app.store.fail_position_writes_after(Some(2));

    let response = app
        .reorder(
            &course_id,
            json!([
                { "id": c, "position": 0 },
                { "id": a, "position": 1 },
                { "id": b, "position": 2 },
            ]),
        )
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["code"], 10009);

    app.store.fail_position_writes_after(None);
    assert_eq!(app.store.positions(course_id.parse().unwrap()), vec![0, 1, 2]);
    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section A", "Section B", "Section C"]
    );
}

#[tokio::test]
async fn test_section_of_other_course_is_rejected() {
    let app = TestApp::new();
    let (course_id, [a, b, _]) = app.course_with_abc().await;
    let (_, [foreign, _, _]) = app.course_with_abc().await;

    let response = app
        .reorder(
            &course_id,
            json!([
                { "id": a, "position": 0 },
                { "id": b, "position": 1 },
                { "id": foreign, "position": 2 },
            ]),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section A", "Section B", "Section C"]
    );
}

#[tokio::test]
async fn test_positions_with_gap_are_rejected() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;

    let response = app
        .reorder(
            &course_id,
            json!([
                { "id": a, "position": 0 },
                { "id": b, "position": 1 },
                { "id": c, "position": 3 },
            ]),
        )
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], 10008);
    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section A", "Section B", "Section C"]
    );
}

#[tokio::test]
async fn test_duplicate_positions_are_rejected() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;

    app.reorder(
        &course_id,
        json!([
            { "id": a, "position": 0 },
            { "id": b, "position": 0 },
            { "id": c, "position": 1 },
        ]),
    )
    .await
    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_partial_batch_is_rejected() {
    let app = TestApp::new();
    let (course_id, [a, b, _]) = app.course_with_abc().await;

    app.reorder(
        &course_id,
        json!([
            { "id": b, "position": 0 },
            { "id": a, "position": 1 },
        ]),
    )
    .await
    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.store.positions(course_id.parse().unwrap()), vec![0, 1, 2]);
}

#[tokio::test]
async fn test_reorder_of_other_instructors_course_is_not_found() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;

    app.server
        .put(&format!("/api/v1/courses/{}/sections/reorder", course_id))
        .authorization_bearer(crate::common::token_for("someone_else"))
        .json(&json!({ "list": [
            { "id": c, "position": 0 },
            { "id": a, "position": 1 },
            { "id": b, "position": 2 },
        ]}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_requires_token() {
    let app = TestApp::new();
    let (course_id, _) = app.course_with_abc().await;

    app.server
        .put(&format!("/api/v1/courses/{}/sections/reorder", course_id))
        .json(&json!({ "list": [] }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_batch_captured_from_drag_gesture() {
    use course_authoring::domain::services::{compute_reorder, snapshot_batch};
    use course_authoring::domain::MoveEvent;

    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;
    let rendered: Vec<uuid::Uuid> = [&a, &b, &c].iter().map(|id| id.parse().unwrap()).collect();

    // drag the first item below the last
    let reordered = compute_reorder(&rendered, MoveEvent::new(0, 2));
    let list: Vec<Value> = snapshot_batch(reordered)
        .into_iter()
        .map(|entry| json!({ "id": entry.section_id, "position": entry.position }))
        .collect();

    app.reorder(&course_id, Value::Array(list)).await.assert_status_ok();

    assert_eq!(
        app.section_titles(&course_id).await,
        vec!["Section B", "Section C", "Section A"]
    );
}

#[tokio::test]
async fn test_position_beyond_integer_range_is_invalid_ordering() {
    let app = TestApp::new();
    let (course_id, [a, b, c]) = app.course_with_abc().await;

    let response = app
        .reorder(
            &course_id,
            json!([
                { "id": a, "position": 0 },
                { "id": b, "position": 1 },
                { "id": c, "position": 3000000000u64 },
            ]),
        )
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], 10008);
    assert_eq!(app.store.positions(course_id.parse().unwrap()), vec![0, 1, 2]);
}

#[tokio::test]
async fn test_unreadable_section_id_is_not_found() {
    let app = TestApp::new();
    let (course_id, [a, b, _]) = app.course_with_abc().await;

    let response = app
        .reorder(
            &course_id,
            json!([
                { "id": a, "position": 0 },
                { "id": b, "position": 1 },
                { "id": "not-a-section", "position": 2 },
            ]),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], 10001);
}

#[tokio::test]
async fn test_malformed_batch_carries_error_code() {
    let app = TestApp::new();
    let (course_id, _) = app.course_with_abc().await;

    let response = app
        .server
        .put(&format!("/api/v1/courses/{}/sections/reorder", course_id))
        .authorization_bearer(&app.token)
        .json(&json!({ "list": [{ "id": true, "position": "first" }] }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], 10008);
}

#[tokio::test]
async fn test_positions_stay_dense_across_edits() {
    use course_authoring::domain::services::{compute_reorder, snapshot_batch};
    use course_authoring::domain::MoveEvent;

    let app = TestApp::new();
    let (course_id, _) = app.course_with_abc().await;
    let course_uuid: uuid::Uuid = course_id.parse().unwrap();

    let current_ids = |response: axum_test::TestResponse| -> Vec<uuid::Uuid> {
        response
            .json::<Vec<Value>>()
            .iter()
            .map(|s| s["id"].as_str().unwrap().parse().unwrap())
            .collect()
    };
    let sections_path = format!("/api/v1/courses/{}/sections", course_id);

    let gestures = [
        MoveEvent::new(2, 0),
        MoveEvent::new(0, 3),
        MoveEvent::cancelled(1),
        MoveEvent::new(1, 2),
    ];
    for (round, gesture) in gestures.into_iter().enumerate() {
        let listed = app.server.get(&sections_path).authorization_bearer(&app.token).await;
        let ids = current_ids(listed);
        let list: Vec<Value> = snapshot_batch(compute_reorder(&ids, gesture))
            .into_iter()
            .map(|entry| json!({ "id": entry.section_id, "position": entry.position }))
            .collect();

        app.reorder(&course_id, Value::Array(list)).await.assert_status_ok();
        let expected: Vec<i32> = (0..ids.len() as i32).collect();
        assert_eq!(app.store.positions(course_uuid), expected);

        if round % 2 == 0 {
            app.create_section(&course_id, &format!("Section {}", round + 4)).await;
        } else {
            app.server
                .delete(&format!("{}/{}", sections_path, ids[0]))
                .authorization_bearer(&app.token)
                .await
                .assert_status(StatusCode::NO_CONTENT);
        }
        let count = app.store.positions(course_uuid).len() as i32;
        assert_eq!(app.store.positions(course_uuid), (0..count).collect::<Vec<_>>());
    }
}
