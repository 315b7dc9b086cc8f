pub mod cognito_client;
pub mod sigv4;
