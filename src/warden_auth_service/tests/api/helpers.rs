use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use reqwest::{Client, Response};
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use warden_adapters::{
    CognitoClient, HashMapUserStore, JwtAuthConfig,
    config::{CognitoSettings, test},
};
use warden_auth_service::AuthService;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method},
};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const CLIENT_ID: &str = "test-client-id";
pub const POOL_ID: &str = "us-east-1_testpool";

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub cognito_server: MockServer,
    pub user_store: HashMapUserStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let cognito_server = MockServer::start().await;
        let user_store = HashMapUserStore::default();

        let jwt_config = JwtAuthConfig {
            jwt_secret: Secret::from(JWT_SECRET.to_owned()),
            token_ttl_in_seconds: 600,
        };
        let cognito_settings = CognitoSettings {
            region: test::cognito::REGION.to_owned(),
            endpoint: Some(cognito_server.uri()),
            access_key_id: Secret::from("AKIDEXAMPLE".to_owned()),
            secret_access_key: Secret::from("test-secret-key".to_owned()),
            timeout_in_millis: test::cognito::TIMEOUT.as_millis() as u64,
        };
        let cognito_http_client = Client::builder()
            .timeout(test::cognito::TIMEOUT)
            .build()
            .expect("Failed to build identity provider http client");
        let cognito = CognitoClient::new(&cognito_settings, cognito_http_client)
            .expect("Failed to build identity provider client");

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Listener has no address")
        );

        let auth_service = AuthService::new(user_store.clone(), cognito, jwt_config);
        tokio::spawn(auth_service.run_standalone(listener, None));

        Self {
            address,
            http_client: Client::new(),
            cognito_server,
            user_store,
        }
    }

    pub async fn get_root(&self) -> Response {
        self.http_client
            .get(format!("{}/", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.http_client
            .post(format!("{}{path}", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// POST with a bearer token and both routing headers.
    pub async fn post_protected(&self, path: &str, token: &str, body: &Value) -> Response {
        self.http_client
            .post(format!("{}{path}", self.address))
            .bearer_auth(token)
            .header("aws_client_id", CLIENT_ID)
            .header("aws_cognito_pool_id", POOL_ID)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post_json(
                "/app/register",
                &json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
        response.json().await.expect("Register body is not JSON")
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let body: Value = self
            .post_json("/app/login", &json!({ "email": email, "password": password }))
            .await
            .json()
            .await
            .expect("Login body is not JSON");
        body["data"]["token"]
            .as_str()
            .expect("Login response carries no token")
            .to_owned()
    }

    /// Register a fresh user and log in, returning the session token.
    pub async fn signed_in_token(&self) -> String {
        self.register("Ada", "ada@example.com", "password123").await;
        self.login("ada@example.com", "password123").await
    }

    /// Answer one identity provider operation with `status` and `body`.
    pub async fn mock_cognito(&self, operation: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(header(
                "X-Amz-Target",
                format!("AWSCognitoIdentityProviderService.{operation}").as_str(),
            ))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&self.cognito_server)
            .await;
    }
}

/// An unsigned identity token carrying `cognito:username`.
pub fn id_token(cognito_username: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "cognito:username": cognito_username, "sub": cognito_username })
            .to_string()
            .as_bytes(),
    );
    format!("{header}.{payload}.signature")
}
