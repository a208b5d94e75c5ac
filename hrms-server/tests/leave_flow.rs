mod common;

use chrono::Days;
use common::TestApp;
use http::StatusCode;
use serde_json::{Value, json};
use shared::util::local_today;

fn day(offset: i64) -> String {
    let today = local_today();
    let date = if offset >= 0 {
        today.checked_add_days(Days::new(offset as u64))
    } else {
        today.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    date.unwrap().format("%Y-%m-%d").to_string()
}

fn request(start: i64, end: i64) -> Value {
    json!({
        "leave_type": "annual",
        "start_date": day(start),
        "end_date": day(end),
        "reason": "family trip",
    })
}

#[tokio::test]
async fn test_request_then_approve() {
    let t = TestApp::new().await;
    let (admin_id, admin) = t.admin().await;
    let (employee_id, employee) = t.register("trip@example.com").await;

    let (status, body) = t.post("/api/leaves", &employee, request(1, 3)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["user_id"], employee_id);
    let leave_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = t
        .put(
            &format!("/api/leaves/{leave_id}/status"),
            &admin,
            json!({ "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = t.get(&format!("/api/leaves/{leave_id}"), &employee).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["approved_by"], admin_id);
    assert_eq!(body["data"]["approver_first_name"], "Seeded");
    assert_eq!(body["data"]["email"], "trip@example.com");
}

#[tokio::test]
async fn test_date_rules() {
    let t = TestApp::new().await;
    let (_, token) = t.register("dates@example.com").await;

    let (status, body) = t.post("/api/leaves", &token, request(-1, 2)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Start date cannot be in the past");

    let (status, body) = t.post("/api/leaves", &token, request(3, 2)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "End date must be after start date");

    let (status, body) = t
        .post("/api/leaves", &token, json!({ "leave_type": "sick", "start_date": day(1) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");

    let mut wide = request(1, 2);
    wide["leave_type"] = json!("x".repeat(51));
    let (status, body) = t.post("/api/leaves", &token, wide).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "leave_type");

    let (status, body) = t.post("/api/leaves", &token, json!({ "leave_type": ["annual"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");

    // same-day leave starting today is allowed
    let (status, _) = t.post("/api/leaves", &token, request(0, 0)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_visibility_and_stats() {
    let t = TestApp::new().await;
    let (_, admin) = t.admin().await;
    let (_, alice) = t.register("alice@example.com").await;
    let (_, bob) = t.register("bob@example.com").await;

    t.post("/api/leaves", &alice, request(1, 1)).await;
    t.post("/api/leaves", &alice, request(2, 2)).await;
    let (_, body) = t.post("/api/leaves", &bob, request(1, 2)).await;
    let bob_leave = body["data"]["id"].as_i64().unwrap();

    let (_, body) = t.get("/api/leaves", &alice).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    let (_, body) = t.get("/api/leaves", &admin).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (status, body) = t.get(&format!("/api/leaves/{bob_leave}"), &alice).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"success": false, "message": "Access denied"}));

    t.put(
        &format!("/api/leaves/{bob_leave}/status"),
        &admin,
        json!({ "status": "rejected" }),
    )
    .await;

    let (_, body) = t.get("/api/leaves/stats/overview", &admin).await;
    assert_eq!(
        body["data"],
        json!({"total_leaves": 3, "pending_leaves": 2, "approved_leaves": 0, "rejected_leaves": 1})
    );
    let (_, body) = t.get("/api/leaves/stats/overview", &bob).await;
    assert_eq!(body["data"]["total_leaves"], 1);
    assert_eq!(body["data"]["rejected_leaves"], 1);
}

#[tokio::test]
async fn test_status_update_rules() {
    let t = TestApp::new().await;
    let (_, admin) = t.admin().await;
    let (_, token) = t.register("self@example.com").await;
    let (_, body) = t.post("/api/leaves", &token, request(1, 1)).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = t
        .put(&format!("/api/leaves/{id}/status"), &token, json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");

    let (status, body) = t
        .put(&format!("/api/leaves/{id}/status"), &admin, json!({ "status": "maybe" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status");

    let (status, body) = t
        .put("/api/leaves/424242/status", &admin, json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Leave not found");
}

#[tokio::test]
async fn test_only_pending_leave_can_be_deleted() {
    let t = TestApp::new().await;
    let (_, admin) = t.admin().await;
    let (_, token) = t.register("withdraw@example.com").await;

    let (_, body) = t.post("/api/leaves", &token, request(1, 1)).await;
    let pending = body["data"]["id"].as_i64().unwrap();
    let (_, body) = t.post("/api/leaves", &token, request(2, 2)).await;
    let decided = body["data"]["id"].as_i64().unwrap();
    t.put(
        &format!("/api/leaves/{decided}/status"),
        &admin,
        json!({ "status": "approved" }),
    )
    .await;

    let (status, body) = t.delete(&format!("/api/leaves/{decided}"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete approved/rejected leave");

    let (status, body) = t.delete(&format!("/api/leaves/{pending}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Leave request deleted successfully"})
    );

    let (status, _) = t.get(&format!("/api/leaves/{pending}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
