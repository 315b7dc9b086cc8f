mod federated;
mod helpers;
mod local_auth;
