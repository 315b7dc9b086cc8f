use serde_json::{Value, json};
use secrecy::Secret;
use warden_core::{Email, Password, UserId, UserStatus, UserStore, UserStoreError};

use crate::helpers::TestApp;

#[tokio::test]
async fn root_reports_service_name_and_version() {
    let app = TestApp::new().await;

    let response = app.get_root().await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "warden-auth-service");
    assert!(body["message"].as_str().unwrap().starts_with("warden-auth-service "));
}

#[tokio::test]
async fn register_returns_the_new_profile() {
    let app = TestApp::new().await;

    let body = app.register("Ada", "  ada@example.com ", "password123").await;

    assert_eq!(body["message"], "User created successfully.");
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["status"], "active");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = TestApp::new().await;
    app.register("Ada", "ada@example.com", "password123").await;

    let response = app
        .post_json(
            "/app/register",
            &json!({ "name": "Other", "email": "ada@example.com", "password": "secret99" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "The email has already been taken.");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn register_reports_the_first_invalid_field() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "email": "ada@example.com", "password": "pw" }), "Name field is empty."),
        (json!({ "name": "Ada", "password": "pw" }), "Email field is empty."),
        (
            json!({ "name": "Ada", "email": "not-an-email", "password": "pw" }),
            "Invalid email address.",
        ),
        (json!({ "name": "Ada", "email": "ada@example.com" }), "Password field is empty."),
    ];

    for (request, message) in cases {
        let response = app.post_json("/app/register", &request).await;

        assert_eq!(response.status().as_u16(), 400, "request: {request}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], message, "request: {request}");
    }

    let email = Email::try_from(Secret::from("ada@example.com".to_owned())).unwrap();
    let password = Password::try_from(Secret::from("pw".to_owned())).unwrap();
    assert_eq!(
        app.user_store
            .authenticate_user(&email, &password)
            .await
            .unwrap_err(),
        UserStoreError::UserNotFound
    );
    app.register("Ada", "ada@example.com", "pw").await;
}

#[tokio::test]
async fn login_returns_profile_and_token() {
    let app = TestApp::new().await;
    app.register("Ada", "ada@example.com", "password123").await;

    let response = app
        .post_json(
            "/app/login",
            &json!({ "email": "ada@example.com", "password": "password123" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login Successfully");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.register("Ada", "ada@example.com", "password123").await;

    let response = app
        .post_json(
            "/app/login",
            &json!({ "email": "ada@example.com", "password": "wrong-password" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid Credentials.");
}

#[tokio::test]
async fn login_for_unknown_email_is_user_not_found() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/app/login",
            &json!({ "email": "nobody@example.com", "password": "password123" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn login_with_malformed_body_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/app/login", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn login_of_inactive_user_is_user_not_found() {
    let app = TestApp::new().await;
    let registered = app.register("Ada", "ada@example.com", "password123").await;
    let user_id: UserId = registered["data"]["id"].as_str().unwrap().parse().unwrap();
    app.user_store
        .set_status(&user_id, UserStatus::Inactive)
        .await
        .unwrap();

    let response = app
        .post_json(
            "/app/login",
            &json!({ "email": "ada@example.com", "password": "password123" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}
