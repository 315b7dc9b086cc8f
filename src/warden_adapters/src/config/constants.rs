pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const AWS_ACCESS_KEY_ENV_VAR: &str = "AWS_ACCESS_KEY";
    pub const AWS_SECRET_KEY_ENV_VAR: &str = "AWS_SECRET_KEY";
    pub const AWS_REGION_ENV_VAR: &str = "AWS_REGION";
    pub const AUTH_SERVICE_ALLOWED_ORIGINS_ENV_VAR: &str = "AUTH_SERVICE_ALLOWED_ORIGINS";
}

/// Prefix for layered overrides, e.g. `WARDEN__AUTH__JWT__TIME_TO_LIVE`.
pub const CONFIG_ENV_PREFIX: &str = "WARDEN";
pub const CONFIG_ENV_SEPARATOR: &str = "__";
pub const CONFIG_FILE: &str = "config/base";

pub const DEFAULT_JWT_TIME_TO_LIVE_SECONDS: i64 = 3600;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod cognito {
        pub const REGION: &str = "us-east-1";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod cognito {
        use std::time::Duration;

        pub const REGION: &str = "us-east-1";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
