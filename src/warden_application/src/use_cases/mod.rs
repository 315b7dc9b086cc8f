pub mod change_password;
pub mod create_pool;
pub mod federated;
pub mod federated_login;
pub mod federated_register;
pub mod force_password_change;
pub mod forgot_password;
pub mod login;
pub mod register;
pub mod reset_password;
