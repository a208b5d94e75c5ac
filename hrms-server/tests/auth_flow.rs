mod common;

use common::{PASSWORD, TestApp};
use http::{Method, StatusCode};
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn test_register_login_validate_resolve_same_user() {
    let t = TestApp::new().await;
    let (id, register_token) = t.register("Ana@Example.com").await;

    let (status, body) = t.login("ana@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["id"], id);
    assert!(body["user"].get("password").is_none());

    for token in [register_token.as_str(), body["token"].as_str().unwrap()] {
        let (status, body) = t.get("/api/auth/validate", token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Token is valid");
        assert_eq!(body["user"]["id"], id);
        assert_eq!(body["user"]["email"], "ana@example.com");
    }
}

#[tokio::test]
async fn test_register_ignores_requested_role() {
    let t = TestApp::new().await;
    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "mallory@example.com",
                "password": PASSWORD,
                "first_name": "Mallory",
                "last_name": "M",
                "role": "admin",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["role"], "employee");
}

#[tokio::test]
async fn test_register_resolves_department_by_name() {
    let t = TestApp::new().await;
    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "hr@example.com",
                "password": PASSWORD,
                "first_name": "Hana",
                "last_name": "R",
                "department": "human resources",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"]["department_id"].is_i64());
}

#[tokio::test]
async fn test_register_validation_lists_fields() {
    let t = TestApp::new().await;
    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "email": "nope", "password": "123", "first_name": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["email", "password", "first_name", "last_name"]);
}

#[tokio::test]
async fn test_wrong_typed_fields_use_auth_envelope() {
    let t = TestApp::new().await;
    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "typed@example.com",
                "password": 123456,
                "first_name": "Ty",
                "last_name": "Ped",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"][0]["field"], "body");
    assert!(body.get("success").is_none());

    let (status, _) = t.login("typed@example.com", "123456").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_values_wider_than_columns() {
    let t = TestApp::new().await;
    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "wide@example.com",
                "password": PASSWORD,
                "first_name": "a".repeat(101),
                "last_name": "Wide",
                "position": "p".repeat(101),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["first_name", "position"]);

    let (_, token) = t.register("narrow@example.com").await;
    let (status, body) = t
        .put("/api/auth/profile", &token, json!({ "last_name": "b".repeat(101) }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "last_name");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let t = TestApp::new().await;
    t.register("dup@example.com").await;
    let (status, body) = t
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "email": "DUP@example.com",
                "password": PASSWORD,
                "first_name": "Dup",
                "last_name": "Licate",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User with this email already exists");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let t = TestApp::new().await;
    let (id, _) = t.register("who@example.com").await;

    let (status, wrong_password) = t.login("who@example.com", "not-it").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, unknown) = t.login("nobody@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown);
    assert_eq!(unknown["message"], "Invalid email or password");

    t.state.store.set_active(id, false).await.unwrap();
    let (status, inactive) = t.login("who@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(inactive, unknown);
}

#[tokio::test]
async fn test_guard_failures() {
    let t = TestApp::new().await;

    let (status, body) = t.send(Method::GET, "/api/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"status": "error", "message": "Access token required"}));

    let (status, body) = t.get("/api/auth/profile", "not.a.token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let expired = t
        .state
        .tokens
        .sign(&hrms_server::auth::Claims {
            user_id: 1,
            email: "x@example.com".into(),
            iat: 1_000,
            exp: 2_000,
        })
        .unwrap();
    let (status, body) = t.get("/api/auth/profile", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired");

    let ghost = t.state.tokens.issue(9_999, "ghost@example.com").unwrap();
    let (status, body) = t.get("/api/auth/profile", &ghost).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User not found or inactive");
}

#[tokio::test]
async fn test_deactivation_rejects_outstanding_token() {
    let t = TestApp::new().await;
    let (_, admin) = t.admin().await;
    let (id, token) = t.register("leaver@example.com").await;

    let (status, _) = t.get("/api/auth/validate", &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = t
        .put(
            &format!("/api/employees/{id}/status"),
            &admin,
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["is_active"], false);

    let (status, body) = t.get("/api/auth/validate", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User not found or inactive");
}

#[tokio::test]
async fn test_profile_update() {
    let t = TestApp::new().await;
    let (_, token) = t.register("edit@example.com").await;

    let (status, body) = t
        .put(
            "/api/auth/profile",
            &token,
            json!({ "first_name": " Edith ", "position": "Analyst", "department": "Operations" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["first_name"], "Edith");
    assert_eq!(body["user"]["last_name"], "Employee");
    assert_eq!(body["user"]["position"], "Analyst");
    assert!(body["user"]["department_id"].is_i64());

    let (_, body) = t.get("/api/auth/profile", &token).await;
    assert_eq!(body["message"], "Profile retrieved successfully");
    assert_eq!(body["user"]["first_name"], "Edith");
}

#[tokio::test]
async fn test_manager_account_logs_in() {
    let t = TestApp::new().await;
    let (id, token) = t.account("boss@example.com", Role::Manager).await;
    let (_, body) = t.get("/api/auth/validate", &token).await;
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["role"], "manager");
}
