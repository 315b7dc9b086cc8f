use serde_json::{Value, json};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_partial_json, header},
};

use crate::helpers::{CLIENT_ID, POOL_ID, TestApp, id_token};

#[tokio::test]
async fn login_with_permanent_password_is_authenticated() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    app.mock_cognito(
        "AdminInitiateAuth",
        200,
        json!({ "AuthenticationResult": { "IdToken": id_token("abc-123"), "AccessToken": "at" } }),
    )
    .await;

    let response = app
        .post_protected(
            "/cognito-user/login",
            &token,
            &json!({ "email": "grace@example.com", "password": "Secret!23" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Authenticated.");
    assert_eq!(body["data"], json!({ "cognito_username": "abc-123" }));
}

#[tokio::test]
async fn challenge_then_force_password_change() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    app.mock_cognito(
        "AdminInitiateAuth",
        200,
        json!({ "ChallengeName": "NEW_PASSWORD_REQUIRED", "Session": "session-1" }),
    )
    .await;

    let response = app
        .post_protected(
            "/cognito-user/login",
            &token,
            &json!({ "email": "grace@example.com", "password": "Temp0rary!" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 202);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Temporary Password Change Required.");
    assert_eq!(
        body["data"],
        json!({ "cognito_session": "session-1", "email": "grace@example.com" })
    );

    Mock::given(header(
        "X-Amz-Target",
        "AWSCognitoIdentityProviderService.RespondToAuthChallenge",
    ))
    .and(body_partial_json(json!({
        "ChallengeName": "NEW_PASSWORD_REQUIRED",
        "ClientId": CLIENT_ID,
        "Session": "session-1"
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(
        json!({ "AuthenticationResult": { "IdToken": id_token("abc-123") } }),
    ))
    .expect(1)
    .mount(&app.cognito_server)
    .await;

    let response = app
        .post_protected(
            "/cognito-user/force-password-change",
            &token,
            &json!({
                "email": "grace@example.com",
                "password": "N3w-Password!",
                "cognito_session": "session-1"
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password changed successfully.");
    assert_eq!(body["data"], json!({ "cognito_username": "abc-123" }));
}

#[tokio::test]
async fn login_with_malformed_email_is_rejected_before_provider_call() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;

    let response = app
        .post_protected(
            "/cognito-user/login",
            &token,
            &json!({ "email": "grace", "password": "Secret!23" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email or Password is invalid.");
}

#[tokio::test]
async fn login_rejected_by_provider_is_user_not_found() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    app.mock_cognito(
        "AdminInitiateAuth",
        400,
        json!({ "__type": "NotAuthorizedException", "message": "Incorrect username or password." }),
    )
    .await;

    let response = app
        .post_protected(
            "/cognito-user/login",
            &token,
            &json!({ "email": "grace@example.com", "password": "wrong" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found.");
}

#[tokio::test]
async fn register_creates_provider_user() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    Mock::given(header(
        "X-Amz-Target",
        "AWSCognitoIdentityProviderService.AdminCreateUser",
    ))
    .and(body_partial_json(json!({
        "UserPoolId": POOL_ID,
        "Username": "grace@example.com",
        "DesiredDeliveryMediums": ["EMAIL"]
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "User": {
            "Username": "abc-123",
            "Attributes": [
                { "Name": "sub", "Value": "abc-123" },
                { "Name": "email", "Value": "grace@example.com" }
            ],
            "UserStatus": "FORCE_CHANGE_PASSWORD"
        }
    })))
    .expect(1)
    .mount(&app.cognito_server)
    .await;

    let response = app
        .post_protected(
            "/cognito-user/create",
            &token,
            &json!({ "name": "Grace", "email": "grace@example.com", "email_verified": "true" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "User Created. Email has been sent to respective email."
    );
    assert_eq!(body["data"]["cognito_username"], "abc-123");
    assert_eq!(body["data"]["cognito_id"], "abc-123");
    assert_eq!(body["data"]["email"], "grace@example.com");
}

#[tokio::test]
async fn forgot_password_succeeds_when_provider_accepts() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    app.mock_cognito(
        "ForgotPassword",
        200,
        json!({ "CodeDeliveryDetails": { "DeliveryMedium": "EMAIL" } }),
    )
    .await;

    let response = app
        .post_protected(
            "/cognito-user/forgot-password",
            &token,
            &json!({ "email": "grace@example.com" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Success, we have forwarded password reset code to the respective mail."
    );
}

#[tokio::test]
async fn forgot_password_failure_is_internal_error() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    app.mock_cognito(
        "ForgotPassword",
        400,
        json!({ "__type": "UserNotFoundException", "message": "no such user" }),
    )
    .await;

    let response = app
        .post_protected(
            "/cognito-user/forgot-password",
            &token,
            &json!({ "email": "grace@example.com" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Forget password process failed.");
}

#[tokio::test]
async fn reset_password_confirms_code() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    Mock::given(header(
        "X-Amz-Target",
        "AWSCognitoIdentityProviderService.ConfirmForgotPassword",
    ))
    .and(body_partial_json(json!({
        "ClientId": CLIENT_ID,
        "Username": "grace@example.com",
        "ConfirmationCode": "123456"
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .expect(1)
    .mount(&app.cognito_server)
    .await;

    let response = app
        .post_protected(
            "/cognito-user/reset-password",
            &token,
            &json!({ "email": "grace@example.com", "password": "N3w-Password!", "code": "123456" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password changed successfully.");
}

#[tokio::test]
async fn reset_password_with_missing_code_is_invalid_request_data() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;

    let response = app
        .post_protected(
            "/cognito-user/reset-password",
            &token,
            &json!({ "email": "grace@example.com", "password": "N3w-Password!" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid request data.");
}

#[tokio::test]
async fn change_password_signs_in_then_changes() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;
    app.mock_cognito(
        "AdminInitiateAuth",
        200,
        json!({ "AuthenticationResult": { "IdToken": id_token("abc-123"), "AccessToken": "access-1" } }),
    )
    .await;
    Mock::given(header(
        "X-Amz-Target",
        "AWSCognitoIdentityProviderService.ChangePassword",
    ))
    .and(body_partial_json(json!({ "AccessToken": "access-1" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
    .expect(1)
    .mount(&app.cognito_server)
    .await;

    let response = app
        .post_protected(
            "/cognito-user/change-password",
            &token,
            &json!({
                "email": "grace@example.com",
                "current_password": "Old-Passw0rd",
                "new_password": "N3w-Password!"
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password update successful.");
}

#[tokio::test]
async fn force_password_change_requires_every_field() {
    let app = TestApp::new().await;
    let token = app.signed_in_token().await;

    let cases = [
        json!({ "password": "N3w-Password!", "cognito_session": "session-1" }),
        json!({ "email": "grace@example.com", "cognito_session": "session-1" }),
        json!({ "email": "grace@example.com", "password": "N3w-Password!" }),
    ];

    for request in cases {
        let response = app
            .post_protected("/cognito-user/force-password-change", &token, &request)
            .await;

        assert_eq!(response.status().as_u16(), 400, "request: {request}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Invalid request data.", "request: {request}");
    }
}
