use serde::{Deserialize, Serialize};

use super::user::{User, UserId};

/// Claims carried by a local session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request once the bearer token and the live user
/// re-check have both passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            email: user.email().as_str().to_owned(),
            name: user.name().as_str().to_owned(),
        }
    }
}
