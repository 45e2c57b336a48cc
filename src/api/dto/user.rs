//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{NewUser, User};

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Missing fields take zero values and any `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub name: String,
    pub age: i64,
    pub class: String,
}

impl UserRequest {
    /// Decodes a request body. A JSON `null` counts as an empty object.
    pub fn from_json(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })
    }
}

impl From<UserRequest> for NewUser {
    fn from(request: UserRequest) -> Self {
        NewUser {
            name: request.name,
            age: request.age,
            class: request.class,
        }
    }
}

/// User as rendered in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub class: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            class: user.class,
        }
    }
}
