use crate::envelope::ApiResponse;

const SERVICE_NAME: &str = "warden-auth-service";

pub async fn index() -> ApiResponse {
    ApiResponse::ok(format!("{SERVICE_NAME} {}", env!("CARGO_PKG_VERSION"))).with_data(
        serde_json::json!({ "name": SERVICE_NAME, "version": env!("CARGO_PKG_VERSION") }),
    )
}
