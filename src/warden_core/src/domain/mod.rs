pub mod email;
pub mod federated;
pub mod id_token;
pub mod password;
pub mod session;
pub mod temporary_password;
pub mod user;
